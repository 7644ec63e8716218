//! Timezone handling for the encoder.
//!
//! Identifiers are opaque strings on the model. They are resolved through
//! `chrono-tz` only to compute wall-clock values, and matched against a
//! small static table when `VTIMEZONE` blocks are requested.

mod resolver;
mod vtimezone;

pub use resolver::{ConversionError, TimeZoneResolver, localize, normalize_tzid};
pub use vtimezone::{StaticZone, ZoneRule, lookup_static_zone};
