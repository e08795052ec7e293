//! Interview-slot calendar model.
//!
//! [`CalendarState`] is a small `Copy` value. Every user interaction is a
//! pure transition returning the next state, and the only output, a
//! finalized day+time pick, comes back as a [`CalendarEvent`] instead of a
//! callback. Rendering reads the derived queries (`days_in_visible_month`,
//! `has_slot`, `is_selected`, ...) which never mutate anything.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};

use crate::models::{InterviewSlot, SlotTime};

/// Column headers of the month grid, Monday first
pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// One cell of the month grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayCell {
    /// Padding before the first day so it lands under its weekday
    Empty,
    Day(NaiveDate),
}

impl DayCell {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            DayCell::Empty => None,
            DayCell::Day(date) => Some(*date),
        }
    }
}

/// Emitted when the user finalizes a day+time pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarEvent {
    SlotSelected(NaiveDateTime),
}

/// User interactions the calendar understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarAction {
    PreviousMonth,
    NextMonth,
    /// Zero-based month index within the visible year
    JumpToMonth(u32),
    /// Day of the visible month
    SelectDay(u32),
    SelectTime(SlotTime),
}

/// `true` iff some slot falls on `date`. Slot times never take part.
pub fn has_slot(slots: &[InterviewSlot], date: NaiveDate) -> bool {
    slots.iter().any(|slot| slot.date == date)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarState {
    /// First day of the visible month
    visible: NaiveDate,
    selected_day: Option<NaiveDate>,
    selected_instant: Option<NaiveDateTime>,
}

impl CalendarState {
    /// Fresh state for a calendar mount.
    ///
    /// The month of `initial` is shown when a returning user already has a
    /// pick, otherwise the month of `today`.
    pub fn new(today: NaiveDate, initial: Option<NaiveDateTime>) -> Self {
        let anchor = initial.map(|instant| instant.date()).unwrap_or(today);
        Self {
            visible: first_of_month(anchor),
            selected_day: None,
            selected_instant: initial,
        }
    }

    /// Zero-based visible month (0 = January)
    pub fn visible_month(&self) -> u32 {
        self.visible.month0()
    }

    pub fn visible_year(&self) -> i32 {
        self.visible.year()
    }

    pub fn selected_day(&self) -> Option<NaiveDate> {
        self.selected_day
    }

    pub fn selected_instant(&self) -> Option<NaiveDateTime> {
        self.selected_instant
    }

    /// Heading such as "March 2025"
    pub fn month_label(&self) -> String {
        format!(
            "{} {}",
            MONTH_NAMES[self.visible_month() as usize],
            self.visible_year()
        )
    }

    /// Date of `day` within the visible month, if that day exists
    pub fn date_of(&self, day: u32) -> Option<NaiveDate> {
        self.visible.with_day(day)
    }

    // ------------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------------

    pub fn navigate_previous_month(self) -> Self {
        match self.visible.checked_sub_months(Months::new(1)) {
            Some(visible) => self.show(visible),
            None => self,
        }
    }

    pub fn navigate_next_month(self) -> Self {
        match self.visible.checked_add_months(Months::new(1)) {
            Some(visible) => self.show(visible),
            None => self,
        }
    }

    /// Show `month_index` (0-11) of the visible year. Other indices are ignored.
    pub fn jump_to_month(self, month_index: u32) -> Self {
        match self.visible.with_month0(month_index) {
            Some(visible) => self.show(visible),
            None => {
                tracing::debug!("Ignoring jump to month index {}", month_index);
                self
            }
        }
    }

    /// Open the time panel of `day` if it is a day of the visible month with
    /// at least one slot; otherwise nothing changes.
    pub fn select_day(self, slots: &[InterviewSlot], day: u32) -> Self {
        match self.date_of(day) {
            Some(date) if has_slot(slots, date) => {
                tracing::debug!("Selected interview day {}", date);
                Self {
                    selected_day: Some(date),
                    ..self
                }
            }
            _ => self,
        }
    }

    /// Combine the open day with `time`. Without an open day nothing
    /// changes and no event is emitted.
    pub fn select_time(self, time: SlotTime) -> (Self, Option<CalendarEvent>) {
        let Some(day) = self.selected_day else {
            return (self, None);
        };

        let instant = time.on(day);
        tracing::debug!("Selected interview slot {}", instant);
        (
            Self {
                selected_instant: Some(instant),
                ..self
            },
            Some(CalendarEvent::SlotSelected(instant)),
        )
    }

    /// Single entry point for driving the calendar from UI handlers.
    pub fn apply(
        self,
        action: CalendarAction,
        slots: &[InterviewSlot],
    ) -> (Self, Option<CalendarEvent>) {
        match action {
            CalendarAction::PreviousMonth => (self.navigate_previous_month(), None),
            CalendarAction::NextMonth => (self.navigate_next_month(), None),
            CalendarAction::JumpToMonth(month_index) => (self.jump_to_month(month_index), None),
            CalendarAction::SelectDay(day) => (self.select_day(slots, day), None),
            CalendarAction::SelectTime(time) => self.select_time(time),
        }
    }

    // A month change closes the day panel; a finalized pick survives browsing.
    fn show(self, visible: NaiveDate) -> Self {
        Self {
            visible,
            selected_day: None,
            ..self
        }
    }

    // ------------------------------------------------------------------------
    // Derived queries
    // ------------------------------------------------------------------------

    pub fn days_in_month(&self) -> usize {
        let month = self.visible.month();
        self.visible
            .iter_days()
            .take_while(|date| date.month() == month)
            .count()
    }

    /// Padding cells before day 1 in a Monday-first week
    pub fn leading_empty_cells(&self) -> usize {
        self.visible.weekday().num_days_from_monday() as usize
    }

    /// Grid cells of the visible month, padded so day 1 sits under its weekday.
    pub fn days_in_visible_month(&self) -> impl Iterator<Item = DayCell> {
        let month = self.visible.month();
        std::iter::repeat(DayCell::Empty)
            .take(self.leading_empty_cells())
            .chain(
                self.visible
                    .iter_days()
                    .take_while(move |date| date.month() == month)
                    .map(DayCell::Day),
            )
    }

    /// The day the current pick points at: the resolved instant once a time
    /// has been chosen, the open day before that.
    pub fn is_selected(&self, date: NaiveDate) -> bool {
        match (self.selected_instant, self.selected_day) {
            (Some(instant), _) => instant.date() == date,
            (None, Some(day)) => day == date,
            (None, None) => false,
        }
    }

    /// Times offered on the open day, in supplied order without repeats.
    pub fn time_options(&self, slots: &[InterviewSlot]) -> Vec<SlotTime> {
        let Some(day) = self.selected_day else {
            return Vec::new();
        };

        let mut times: Vec<SlotTime> = Vec::new();
        for slot in slots.iter().filter(|slot| slot.date == day) {
            if !times.contains(&slot.time) {
                times.push(slot.time);
            }
        }
        times
    }

    /// Whether the time button for `time` on the open day is the current pick
    pub fn is_time_selected(&self, time: SlotTime) -> bool {
        match (self.selected_day, self.selected_instant) {
            (Some(day), Some(instant)) => instant.date() == day && time.matches(&instant),
            _ => false,
        }
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
