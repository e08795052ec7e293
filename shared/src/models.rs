use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::api::RawInterviewDate;

/// Errors raised while turning wire records into interview slots
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotError {
    #[error("invalid interview date: {0:?}")]
    InvalidDate(String),
    #[error("invalid interview time {0:?}, expected HH:MM")]
    InvalidTime(String),
}

/// Wall-clock time of day in 24-hour `HH:MM` form.
///
/// Only constructible through [`SlotTime::new`] or parsing, so hours are
/// always in `0..=23` and minutes in `0..=59`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotTime {
    hour: u32,
    minute: u32,
}

impl SlotTime {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Combine with a calendar date into a single instant.
    pub fn on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.to_naive_time())
    }

    pub fn to_naive_time(&self) -> NaiveTime {
        // hour/minute are range-checked on construction
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN)
    }

    /// True when `instant` falls on the same hour and minute.
    pub fn matches(&self, instant: &NaiveDateTime) -> bool {
        instant.hour() == self.hour && instant.minute() == self.minute
    }
}

impl FromStr for SlotTime {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SlotError::InvalidTime(s.to_string());

        let (hh, mm) = s.split_once(':').ok_or_else(invalid)?;
        if hh.len() != 2 || mm.len() != 2 {
            return Err(invalid());
        }
        if !hh.bytes().chain(mm.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let hour = hh.parse().map_err(|_| invalid())?;
        let minute = mm.parse().map_err(|_| invalid())?;
        SlotTime::new(hour, minute).ok_or_else(invalid)
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl Serialize for SlotTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SlotTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A day on which an interview may be booked, at one offered time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewSlot {
    pub date: NaiveDate,
    pub time: SlotTime,
}

impl InterviewSlot {
    pub fn new(date: NaiveDate, time: SlotTime) -> Self {
        Self { date, time }
    }

    pub fn instant(&self) -> NaiveDateTime {
        self.time.on(self.date)
    }
}

impl TryFrom<&RawInterviewDate> for InterviewSlot {
    type Error = SlotError;

    fn try_from(raw: &RawInterviewDate) -> Result<Self, Self::Error> {
        Ok(Self {
            date: parse_slot_date(&raw.date)?,
            time: raw.time.trim().parse()?,
        })
    }
}

impl TryFrom<RawInterviewDate> for InterviewSlot {
    type Error = SlotError;

    fn try_from(raw: RawInterviewDate) -> Result<Self, Self::Error> {
        InterviewSlot::try_from(&raw)
    }
}

/// Parse an ISO-8601 date or datetime, keeping only the calendar date.
///
/// Accepts `2025-03-10`, `2025-03-10T09:00:00` and RFC 3339 forms such as
/// `2025-03-10T00:00:00.000Z`. Offsets are dropped rather than converted,
/// since back ends store slot days at midnight UTC.
pub fn parse_slot_date(raw: &str) -> Result<NaiveDate, SlotError> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_local().date());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt.date());
    }

    Err(SlotError::InvalidDate(raw.to_string()))
}
