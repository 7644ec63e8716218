pub mod error;
pub mod ical;
