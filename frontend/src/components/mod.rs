pub mod header;
pub mod interview_calendar;
pub mod service_card;
pub mod service_list;
