//! Input languages for human-entered calendar values.
//!
//! - Durations: `90`, `1h30m`, `45 minutes`, `PT1H`
//! - Timestamps: RFC 3339 and a few `YYYY-MM-DD HH:MM` layouts
//! - Alarm specs: `15m`, `trigger=30m,direction=after`, `15m||1h`

mod alarm;
mod datetime;
mod duration;
mod error;

pub use alarm::{parse_alarms, parse_spec, parse_specs, split_input};
pub use datetime::parse_datetime;
pub use duration::{parse_duration, parse_positive_duration};
pub use error::{ParseError, ParseErrorKind, ParseResult};
