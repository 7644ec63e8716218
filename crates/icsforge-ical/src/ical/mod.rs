//! iCalendar generation (RFC 5545 subset).
//!
//! - `model`: calendars, events and reminders as populated by callers
//! - `parse`: duration, timestamp and alarm-spec input languages
//! - `core`: the content-line tree the serializer renders
//! - `build`: escaping, folding, value formatting and serialization
//! - `tz`: timezone resolution and the static `VTIMEZONE` table

pub mod build;
pub mod core;
pub mod model;
pub mod parse;
pub mod tz;

#[cfg(test)]
mod tests;
