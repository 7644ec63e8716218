//! Timezone identifier resolution.
//!
//! Uses ICU4X for Windows timezone ID to IANA mapping and alias
//! canonicalization before handing the name to `chrono-tz`.

use chrono::{DateTime, FixedOffset, LocalResult, NaiveDateTime, TimeDelta, TimeZone};
use chrono_tz::Tz;
use icu::time::zone::WindowsParser;
use icu::time::zone::iana::IanaParserExtended;
use std::collections::HashMap;
use std::str::FromStr;

/// Error during timezone resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// Unknown or invalid timezone identifier.
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),
}

/// Resolver for timezone identifiers.
///
/// Caches successful resolutions for the lifetime of the resolver, which is
/// one parse or one serialization pass.
#[derive(Debug, Default)]
pub struct TimeZoneResolver {
    cache: HashMap<String, Tz>,
}

impl TimeZoneResolver {
    /// Creates a new timezone resolver.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// ## Summary
    /// Resolves a timezone identifier to a `chrono_tz::Tz`.
    ///
    /// ## Errors
    /// Returns `ConversionError::UnknownTimezone` if the identifier cannot be
    /// resolved after normalization.
    pub fn resolve(&mut self, tzid: &str) -> Result<Tz, ConversionError> {
        if let Some(tz) = self.cache.get(tzid) {
            return Ok(*tz);
        }

        let normalized = normalize_tzid(tzid);
        let tz = Tz::from_str(&normalized)
            .map_err(|_e| ConversionError::UnknownTimezone(tzid.to_string()))?;

        self.cache.insert(tzid.to_string(), tz);
        Ok(tz)
    }

    /// ## Summary
    /// Returns the wall-clock time of `instant` in the zone `tzid`.
    ///
    /// Falls back to the instant's own offset when the zone cannot be
    /// resolved, so output is always produced.
    pub fn wall_time(&mut self, instant: &DateTime<FixedOffset>, tzid: &str) -> NaiveDateTime {
        match self.resolve(tzid) {
            Ok(tz) => instant.with_timezone(&tz).naive_local(),
            Err(e) => {
                tracing::warn!(error = %e, "Unresolvable TZID, using the instant's own offset");
                instant.naive_local()
            }
        }
    }
}

/// Normalizes common calendar-client timezone identifiers to IANA names.
///
/// Strips vendor prefixes, maps Windows zone names and canonicalizes IANA
/// aliases. Unrecognized identifiers are returned without the prefix.
#[must_use]
pub fn normalize_tzid(tzid: &str) -> String {
    let trimmed = tzid.trim();
    let stripped = trimmed
        .strip_prefix("/mozilla.org/")
        .or_else(|| trimmed.strip_prefix("/softwarestudio.org/"))
        .unwrap_or(trimmed);

    let windows_parser = WindowsParser::new();
    if let Some(tz) = windows_parser.parse(stripped, None) {
        let iana_parser = IanaParserExtended::new();
        for entry in iana_parser.iter() {
            if entry.time_zone == tz {
                return entry.canonical.to_string();
            }
        }
    }

    let iana_parser = IanaParserExtended::new();
    let parsed = iana_parser.parse(stripped);
    if parsed.time_zone != icu::time::TimeZone::UNKNOWN {
        return parsed.canonical.to_string();
    }

    stripped.to_string()
}

/// ## Summary
/// Interprets a local wall-clock time in `zone`.
///
/// Ambiguous times (DST fold) resolve to the earlier instant. Non-existent
/// times (DST gap) are shifted forward by one hour. Returns `None` only when
/// the shifted time is out of range.
pub fn localize<Z: TimeZone>(zone: &Z, local: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
    match zone.from_local_datetime(&local) {
        LocalResult::Single(dt) => Some(dt.fixed_offset()),
        LocalResult::Ambiguous(earliest, _latest) => Some(earliest.fixed_offset()),
        LocalResult::None => {
            let shifted = local.checked_add_signed(TimeDelta::hours(1))?;
            zone.from_local_datetime(&shifted)
                .earliest()
                .map(|dt| dt.fixed_offset())
        }
    }
}
