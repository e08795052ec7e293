//! Types and client-side logic shared by the booking frontend: service wire
//! records, validated interview slots, the interview calendar model and form
//! validation.

pub mod api;
pub mod calendar;
pub mod forms;
pub mod models;

pub use calendar::{CalendarAction, CalendarEvent, CalendarState, DayCell};
pub use models::{InterviewSlot, SlotError, SlotTime};
