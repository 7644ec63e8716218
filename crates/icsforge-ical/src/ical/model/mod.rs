//! In-memory calendar model populated by callers and consumed by the
//! serializer.
//!
//! Ownership is strictly top-down: a `Calendar` owns its `Event`s, an
//! `Event` owns its `Reminder`s and exception instants.

mod calendar;
mod event;
mod reminder;

pub use calendar::Calendar;
pub use event::Event;
pub use reminder::{AlarmAction, Reminder, Repeat, Trigger};
