//! Human-friendly duration grammar.
//!
//! Accepted forms (case-insensitive, optional leading sign):
//! - bare integer minutes: `90`
//! - compact hours/minutes: `1h30m`, `2h`, `45m`
//! - unit words: `45 minutes`, `1 hour 30 mins`
//! - ISO 8601 subset: `PT45M`, `P1DT2H`, `PT1W`

use chrono::TimeDelta;

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::error::{IcalError, IcalResult};

/// Word spellings folded into the compact unit suffixes. Longest first so
/// that `min` never eats the prefix of `minutes`.
const WORD_UNITS: [(&str, &str); 8] = [
    ("minutes", "m"),
    ("minute", "m"),
    ("mins", "m"),
    ("min", "m"),
    ("hours", "h"),
    ("hour", "h"),
    ("hrs", "h"),
    ("hr", "h"),
];

/// ## Summary
/// Parses a human-entered duration.
///
/// A bare `0` or an ISO value such as `PT0S` yields a zero duration; a
/// compact value that adds up to zero (`0h0m`) is rejected.
///
/// ## Errors
/// Returns a `ParseError` for empty input, unrecognized syntax, a zero
/// compact value, or a value that overflows.
pub fn parse_duration(text: &str) -> ParseResult<TimeDelta> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::empty("duration"));
    }

    let lowered = trimmed.to_ascii_lowercase();
    let (negative, body) = split_sign(&lowered);

    let parsed = if is_digits(body) {
        digits(body, TimeDelta::try_minutes)
    } else if let Some(rest) = body.strip_prefix('p') {
        parse_iso(rest)
    } else {
        let compact = normalize_words(body);
        match parse_compact(&compact) {
            Some(total) if total.is_zero() => {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidDuration,
                    format!("{trimmed:?} adds up to zero"),
                ));
            }
            other => other,
        }
    };
    let magnitude = parsed.ok_or_else(|| ParseError::invalid_duration(trimmed))?;

    Ok(if negative { -magnitude } else { magnitude })
}

/// ## Summary
/// Parses a duration that must be strictly positive, as required for event
/// lengths and alarm repeat intervals.
///
/// ## Errors
/// Returns `IcalError::ParseError` for malformed input and
/// `IcalError::ValidationError` for zero or negative values.
pub fn parse_positive_duration(text: &str) -> IcalResult<TimeDelta> {
    let duration = parse_duration(text)?;
    if duration <= TimeDelta::zero() {
        return Err(IcalError::ValidationError(format!(
            "duration {:?} must be positive",
            text.trim()
        )));
    }
    Ok(duration)
}

fn split_sign(s: &str) -> (bool, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (true, rest.trim_start())
    } else if let Some(rest) = s.strip_prefix('+') {
        (false, rest.trim_start())
    } else {
        (false, s)
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn digits(s: &str, unit: fn(i64) -> Option<TimeDelta>) -> Option<TimeDelta> {
    if !is_digits(s) {
        return None;
    }
    s.parse::<i64>().ok().and_then(unit)
}

fn normalize_words(s: &str) -> String {
    let mut out = s.to_string();
    for (word, suffix) in WORD_UNITS {
        out = out.replace(word, suffix);
    }
    out.split_whitespace().collect()
}

/// `[Nh][Nm]`, at least one group present.
fn parse_compact(s: &str) -> Option<TimeDelta> {
    let (hours, rest) = match s.split_once('h') {
        Some((hours, rest)) => (Some(hours), rest),
        None => (None, s),
    };
    let minutes = if rest.is_empty() {
        None
    } else {
        Some(rest.strip_suffix('m')?)
    };

    if hours.is_none() && minutes.is_none() {
        return None;
    }

    let mut total = TimeDelta::zero();
    if let Some(hours) = hours {
        total = total.checked_add(&digits(hours, TimeDelta::try_hours)?)?;
    }
    if let Some(minutes) = minutes {
        total = total.checked_add(&digits(minutes, TimeDelta::try_minutes)?)?;
    }
    Some(total)
}

/// Everything after the leading `P`: `nW nD nH nM nS` components with at
/// most one `T` separator.
fn parse_iso(rest: &str) -> Option<TimeDelta> {
    let mut total = TimeDelta::zero();
    let mut number_start: Option<usize> = None;
    let mut seen_separator = false;
    let mut components = 0_usize;

    for (idx, c) in rest.char_indices() {
        if c.is_ascii_digit() {
            number_start.get_or_insert(idx);
            continue;
        }
        if c == 't' {
            if seen_separator || number_start.is_some() {
                return None;
            }
            seen_separator = true;
            continue;
        }

        let start = number_start.take()?;
        let value = rest[start..idx].parse::<i64>().ok()?;
        let part = match c {
            'w' => TimeDelta::try_weeks(value),
            'd' => TimeDelta::try_days(value),
            'h' => TimeDelta::try_hours(value),
            'm' => TimeDelta::try_minutes(value),
            's' => TimeDelta::try_seconds(value),
            _ => None,
        }?;
        total = total.checked_add(&part)?;
        components += 1;
    }

    if number_start.is_some() || components == 0 {
        return None;
    }
    Some(total)
}
