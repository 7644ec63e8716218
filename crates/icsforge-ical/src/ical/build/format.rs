//! Value text for DATE, DATE-TIME and DURATION (RFC 5545 §3.3).

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;
const SECONDS_PER_WEEK: u64 = 7 * SECONDS_PER_DAY;

/// `YYYYMMDD`
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// `YYYYMMDDTHHMMSSZ`
#[must_use]
pub fn format_utc(instant: &DateTime<Utc>) -> String {
    instant.format("%Y%m%dT%H%M%SZ").to_string()
}

/// `YYYYMMDDTHHMMSS`, to be paired with a `TZID` parameter.
#[must_use]
pub fn format_local(wall: &NaiveDateTime) -> String {
    wall.format("%Y%m%dT%H%M%S").to_string()
}

/// ## Summary
/// Formats a duration as `[-]P[nW][nD][T[nH][nM][nS]]`.
///
/// Zero units are omitted, zero itself is `PT0S`, and any sub-second
/// remainder is dropped.
///
/// Weeks are combined with smaller units (`P1W1D` for eight days). RFC 5545
/// only allows `nW` on its own, so strict readers may reject such values.
#[must_use]
pub fn format_duration(duration: TimeDelta) -> String {
    let total = duration.num_seconds();
    if total == 0 {
        return "PT0S".to_string();
    }

    let mut remaining = total.unsigned_abs();
    let mut take = |unit: u64| {
        let count = remaining / unit;
        remaining %= unit;
        count
    };
    let weeks = take(SECONDS_PER_WEEK);
    let days = take(SECONDS_PER_DAY);
    let hours = take(SECONDS_PER_HOUR);
    let minutes = take(SECONDS_PER_MINUTE);
    let seconds = remaining;

    let mut out = String::new();
    if total < 0 {
        out.push('-');
    }
    out.push('P');
    if weeks > 0 {
        out.push_str(&format!("{weeks}W"));
    }
    if days > 0 {
        out.push_str(&format!("{days}D"));
    }
    if hours > 0 || minutes > 0 || seconds > 0 {
        out.push('T');
        if hours > 0 {
            out.push_str(&format!("{hours}H"));
        }
        if minutes > 0 {
            out.push_str(&format!("{minutes}M"));
        }
        if seconds > 0 {
            out.push_str(&format!("{seconds}S"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn duration_text() {
        assert_eq!(format_duration(TimeDelta::zero()), "PT0S");
        assert_eq!(format_duration(TimeDelta::minutes(-15)), "-PT15M");
        assert_eq!(format_duration(TimeDelta::minutes(90)), "PT1H30M");
        assert_eq!(format_duration(TimeDelta::hours(26)), "P1DT2H");
    }

    #[test]
    fn duration_weeks_and_seconds() {
        assert_eq!(format_duration(TimeDelta::days(8)), "P1W1D");
        assert_eq!(format_duration(TimeDelta::weeks(2)), "P2W");
        assert_eq!(format_duration(TimeDelta::seconds(-3661)), "-PT1H1M1S");
        assert_eq!(format_duration(TimeDelta::days(1)), "P1D");
    }

    #[test]
    fn duration_drops_sub_seconds() {
        assert_eq!(format_duration(TimeDelta::milliseconds(500)), "PT0S");
        assert_eq!(format_duration(TimeDelta::milliseconds(1500)), "PT1S");
    }

    #[test]
    fn date_and_time_text() {
        let date = NaiveDate::from_ymd_opt(2026, 7, 4).expect("date");
        assert_eq!(format_date(date), "20260704");

        let wall = date.and_hms_opt(9, 5, 7).expect("time");
        assert_eq!(format_local(&wall), "20260704T090507");

        let utc = Utc.with_ymd_and_hms(2026, 12, 31, 23, 59, 0).unwrap();
        assert_eq!(format_utc(&utc), "20261231T235900Z");
    }
}
