//! End-to-end tests: human-entered alarm specs and timestamps flowing
//! through the model into serialized calendar text.

use chrono::{TimeDelta, TimeZone, Utc};
use icsforge_core::config::CalendarConfig;
use icsforge_ical::error::IcalError;
use icsforge_ical::ical::build::serialize_at;
use icsforge_ical::ical::model::{Calendar, Event, Trigger};
use icsforge_ical::ical::parse::{parse_alarms, parse_datetime, parse_positive_duration};

/// ## Summary
/// Builds a Paris event from local input and attaches parsed reminders.
#[test_log::test]
fn parsed_alarms_are_serialized() {
    let tz = "Europe/Paris";
    let start = parse_datetime("2026-07-01 09:00", Some(tz)).expect("start parses");
    let length = parse_positive_duration("1h30m").expect("length parses");

    let mut event = Event::new("Planning", start, start + length).with_timezone(tz);
    event.uid = "planning-1".into();
    event.created = Some(Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap());
    event.modified = event.created;

    let reminders =
        parse_alarms("15m || trigger=5m,direction=after,description=Started?", Some(tz))
            .expect("alarms parse");
    assert_eq!(reminders.len(), 2);
    for reminder in reminders {
        event.add_reminder(reminder);
    }

    let mut calendar = Calendar::new();
    calendar.add_event(event);
    let text = serialize_at(&calendar, Utc::now());

    assert!(text.contains("X-WR-TIMEZONE:Europe/Paris\r\n"));
    assert!(text.contains("DTSTART;TZID=Europe/Paris:20260701T090000\r\n"));
    assert!(text.contains("DTEND;TZID=Europe/Paris:20260701T103000\r\n"));
    assert!(text.contains("TRIGGER:-PT15M\r\nDESCRIPTION:Reminder\r\n"));
    assert!(text.contains("TRIGGER:PT5M\r\nDESCRIPTION:Started?\r\n"));
    assert!(text.contains("DTSTAMP:20260601T000000Z\r\n"));
}

/// ## Summary
/// Absolute alarm timestamps are interpreted in the default zone and written
/// in UTC.
#[test]
fn absolute_alarm_in_default_zone() {
    let reminders = parse_alarms("2026-07-01 08:45", Some("Europe/Paris")).expect("parses");
    let fire = Utc.with_ymd_and_hms(2026, 7, 1, 6, 45, 0).unwrap();
    assert_eq!(reminders[0].trigger, Trigger::Absolute(fire));

    let start = parse_datetime("2026-07-01T09:00:00+02:00", None).expect("start parses");
    let mut event = Event::new("x", start, start + TimeDelta::hours(1));
    event.reminders = reminders;

    let mut calendar = Calendar::new();
    calendar.add_event(event);
    let text = serialize_at(&calendar, Utc::now());
    assert!(text.contains("TRIGGER;VALUE=DATE-TIME:20260701T064500Z\r\n"));
}

/// ## Summary
/// Invalid alarm input surfaces as an error instead of a partial list.
#[test]
fn invalid_alarm_input_is_rejected() {
    assert!(matches!(
        parse_alarms("15m\nnot-a-time", None),
        Err(IcalError::ParseError(_))
    ));
    assert!(matches!(
        parse_alarms("trigger=0", None),
        Err(IcalError::ValidationError(_))
    ));
    assert!(matches!(
        parse_positive_duration("-5m"),
        Err(IcalError::ValidationError(_))
    ));
}

/// ## Summary
/// A configured calendar carries its envelope and VTIMEZONE settings into
/// the output.
#[test]
fn configured_calendar_output() {
    let config = CalendarConfig {
        name: Some("On-call".into()),
        method: None,
        include_vtimezone: true,
        default_timezone: Some("America/New_York".into()),
        ..CalendarConfig::default()
    };
    let mut calendar = Calendar::from_config(&config).expect("valid config");

    let start = parse_datetime("2026-01-10 18:00", Some("America/New_York")).expect("parses");
    calendar.add_event(
        Event::new("Shift", start, start + TimeDelta::hours(12)).with_timezone("America/New_York"),
    );
    let text = serialize_at(&calendar, Utc::now());

    assert!(text.starts_with("BEGIN:VCALENDAR\r\n"));
    assert!(text.ends_with("END:VCALENDAR\r\n"));
    assert!(!text.contains("METHOD"));
    assert!(text.contains("X-WR-CALNAME:On-call\r\n"));
    assert!(text.contains("BEGIN:VTIMEZONE\r\nTZID:America/New_York\r\n"));
    assert!(text.contains("DTSTART;TZID=America/New_York:20260110T180000\r\n"));
    assert!(text.contains("DTEND;TZID=America/New_York:20260111T060000\r\n"));
}
