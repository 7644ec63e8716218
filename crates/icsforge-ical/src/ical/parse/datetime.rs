//! Absolute timestamp parsing for alarm triggers and event fields.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime};

use super::error::{ParseError, ParseResult};
use crate::ical::tz::{TimeZoneResolver, localize};

/// Layouts without zone information, tried in order after RFC 3339.
const LOCAL_LAYOUTS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// ## Summary
/// Parses an absolute timestamp.
///
/// RFC 3339 input (also with a space in place of `T`) keeps its own offset.
/// Zone-less layouts are interpreted in `tzid` when it resolves, otherwise in
/// the process-local zone. An unresolvable `tzid` is logged, not an error.
///
/// ## Errors
/// Returns a `ParseError` if the text matches none of the layouts.
pub fn parse_datetime(text: &str, tzid: Option<&str>) -> ParseResult<DateTime<FixedOffset>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::empty("timestamp"));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt);
    }
    if trimmed.contains(' ') {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&trimmed.replacen(' ', "T", 1)) {
            return Ok(dt);
        }
    }

    let naive = LOCAL_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(trimmed, layout).ok())
        .ok_or_else(|| ParseError::invalid_timestamp(trimmed))?;

    in_zone(naive, tzid).ok_or_else(|| ParseError::invalid_timestamp(trimmed))
}

fn in_zone(naive: NaiveDateTime, tzid: Option<&str>) -> Option<DateTime<FixedOffset>> {
    let tzid = tzid.map(str::trim).filter(|tz| !tz.is_empty());
    if let Some(tzid) = tzid {
        match TimeZoneResolver::new().resolve(tzid) {
            Ok(tz) => return localize(&tz, naive),
            Err(e) => {
                tracing::warn!(error = %e, "Falling back to the local zone");
            }
        }
    }
    localize(&Local, naive)
}
