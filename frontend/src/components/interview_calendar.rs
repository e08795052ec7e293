use std::rc::Rc;

use chrono::{Datelike, NaiveDateTime};
use shared::calendar::{has_slot, MONTH_NAMES, WEEKDAY_LABELS};
use shared::{CalendarAction, CalendarEvent, CalendarState, DayCell, InterviewSlot};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct InterviewCalendarProps {
    /// Offered slots, read-only from the calendar's point of view
    pub slots: Rc<Vec<InterviewSlot>>,
    #[prop_or_default]
    pub initial: Option<NaiveDateTime>,
    pub on_select: Callback<NaiveDateTime>,
}

#[function_component(InterviewCalendar)]
pub fn interview_calendar(props: &InterviewCalendarProps) -> Html {
    let initial = props.initial;
    let state = use_state(move || CalendarState::new(chrono::Local::now().date_naive(), initial));
    let month_menu_open = use_state(|| false);

    let dispatch = {
        let state = state.clone();
        let slots = props.slots.clone();
        let on_select = props.on_select.clone();
        Callback::from(move |action: CalendarAction| {
            let (next, event) = (*state).apply(action, &slots);
            if let Some(CalendarEvent::SlotSelected(instant)) = event {
                on_select.emit(instant);
            }
            state.set(next);
        })
    };

    let action = |act: CalendarAction| {
        let dispatch = dispatch.clone();
        Callback::from(move |_: MouseEvent| dispatch.emit(act))
    };

    let toggle_month_menu = {
        let month_menu_open = month_menu_open.clone();
        Callback::from(move |_| month_menu_open.set(!*month_menu_open))
    };

    let month_menu = if *month_menu_open {
        html! {
            <div class="month-menu" role="listbox">
                { for MONTH_NAMES.iter().enumerate().map(|(index, name)| {
                    let pick = action(CalendarAction::JumpToMonth(index as u32));
                    let month_menu_open = month_menu_open.clone();
                    let onclick = Callback::from(move |e: MouseEvent| {
                        month_menu_open.set(false);
                        pick.emit(e);
                    });
                    html! {
                        <button class="month-option" {onclick}>
                            { format!("{} {}", name, state.visible_year()) }
                        </button>
                    }
                })}
            </div>
        }
    } else {
        html! {}
    };

    let cells = state.days_in_visible_month().map(|cell| match cell {
        DayCell::Empty => html! { <div class="calendar-cell empty"></div> },
        DayCell::Day(date) if has_slot(&props.slots, date) => {
            let class = classes!(
                "calendar-cell",
                "available",
                state.is_selected(date).then_some("selected"),
            );
            html! {
                <button {class} onclick={action(CalendarAction::SelectDay(date.day()))}>
                    { date.day() }
                </button>
            }
        }
        DayCell::Day(date) => html! {
            <div class="calendar-cell">{ date.day() }</div>
        },
    });

    let time_panel = match state.selected_day() {
        Some(day) => html! {
            <div class="time-options">
                <h3>{ day.format("%A, %B %-d").to_string() }</h3>
                { for state.time_options(&props.slots).into_iter().map(|time| {
                    let class = classes!(
                        "time-option",
                        state.is_time_selected(time).then_some("selected"),
                    );
                    html! {
                        <button {class} onclick={action(CalendarAction::SelectTime(time))}>
                            { time.to_string() }
                        </button>
                    }
                })}
            </div>
        },
        None => html! {},
    };

    html! {
        <div class="interview-calendar">
            <h2>{ "Choose a date" }</h2>
            <div class="calendar-nav">
                <button
                    class="nav-arrow"
                    aria-label="Previous Month"
                    onclick={action(CalendarAction::PreviousMonth)}
                >
                    { "‹" }
                </button>
                <div class="month-picker">
                    <button
                        class="month-label"
                        aria-haspopup="listbox"
                        aria-expanded={(*month_menu_open).to_string()}
                        onclick={toggle_month_menu}
                    >
                        { state.month_label() }
                    </button>
                    { month_menu }
                </div>
                <button
                    class="nav-arrow"
                    aria-label="Next Month"
                    onclick={action(CalendarAction::NextMonth)}
                >
                    { "›" }
                </button>
            </div>
            <div class="calendar-grid">
                { for WEEKDAY_LABELS.iter().map(|label| html! {
                    <div class="calendar-weekday">{ *label }</div>
                })}
                { for cells }
            </div>
            { time_panel }
            if let Some(instant) = state.selected_instant() {
                <p class="calendar-summary">
                    { format!("Interview: {}", instant.format("%-d %B %Y, %H:%M")) }
                </p>
            }
        </div>
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use std::cell::RefCell;
    use std::time::Duration;

    use chrono::NaiveDate;
    use shared::api::RawInterviewDate;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::{Element, HtmlElement};

    use super::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn slot(date: &str, time: &str) -> InterviewSlot {
        InterviewSlot::try_from(RawInterviewDate::new(date, time)).unwrap()
    }

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    async fn settle() {
        yew::platform::time::sleep(Duration::ZERO).await;
    }

    async fn mount(picked: Rc<RefCell<Vec<NaiveDateTime>>>) -> Element {
        let document = web_sys::window().unwrap().document().unwrap();
        let root = document.create_element("div").unwrap();
        document.body().unwrap().append_child(&root).unwrap();

        let props = InterviewCalendarProps {
            slots: Rc::new(vec![
                slot("2025-03-10", "14:30"),
                slot("2025-03-15", "10:00"),
            ]),
            initial: Some(at(10, 14, 30)),
            on_select: Callback::from(move |instant| picked.borrow_mut().push(instant)),
        };
        yew::Renderer::<InterviewCalendar>::with_root_and_props(root.clone(), props).render();
        settle().await;
        root
    }

    fn texts(root: &Element, selector: &str) -> Vec<String> {
        let nodes = root.query_selector_all(selector).unwrap();
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .map(|node| node.text_content().unwrap_or_default().trim().to_string())
            .collect()
    }

    fn click(root: &Element, selector: &str, text: &str) {
        let nodes = root.query_selector_all(selector).unwrap();
        let target = (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .find(|node| node.text_content().unwrap_or_default().trim() == text)
            .unwrap();
        target.dyn_into::<HtmlElement>().unwrap().click();
    }

    #[wasm_bindgen_test]
    async fn renders_initial_month_with_slot_days() {
        let root = mount(Rc::new(RefCell::new(Vec::new()))).await;

        assert_eq!(texts(&root, ".month-label"), vec!["March 2025"]);
        // 1 March 2025 is a Saturday: five leading cells, then 31 days
        assert_eq!(texts(&root, ".calendar-cell").len(), 36);
        assert_eq!(texts(&root, ".calendar-cell.empty").len(), 5);
        assert_eq!(texts(&root, "button.available"), vec!["10", "15"]);
        assert_eq!(texts(&root, "button.available.selected"), vec!["10"]);
        assert!(texts(&root, ".time-option").is_empty());
    }

    #[wasm_bindgen_test]
    async fn picking_day_then_time_reports_instant() {
        let picked = Rc::new(RefCell::new(Vec::new()));
        let root = mount(picked.clone()).await;

        click(&root, "div.calendar-cell", "11");
        settle().await;
        assert!(texts(&root, ".time-option").is_empty());

        click(&root, "button.available", "15");
        settle().await;
        assert_eq!(texts(&root, ".time-option"), vec!["10:00"]);
        assert!(picked.borrow().is_empty());

        click(&root, ".time-option", "10:00");
        settle().await;
        assert_eq!(*picked.borrow(), vec![at(15, 10, 0)]);
        assert_eq!(texts(&root, ".time-option.selected"), vec!["10:00"]);
        assert_eq!(texts(&root, "button.available.selected"), vec!["15"]);
    }

    #[wasm_bindgen_test]
    async fn navigation_closes_time_panel() {
        let root = mount(Rc::new(RefCell::new(Vec::new()))).await;

        click(&root, "button.available", "15");
        settle().await;
        assert_eq!(texts(&root, ".time-option").len(), 1);

        click(&root, ".nav-arrow", "›");
        settle().await;
        assert_eq!(texts(&root, ".month-label"), vec!["April 2025"]);
        assert!(texts(&root, ".time-option").is_empty());
        assert!(texts(&root, "button.available").is_empty());
    }
}
