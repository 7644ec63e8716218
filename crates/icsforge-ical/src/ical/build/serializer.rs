//! Calendar serialization.
//!
//! The model is first lowered into a `Component` tree of encoded content
//! lines, which is then written out with CRLF terminators and folding.

use chrono::{DateTime, FixedOffset, TimeDelta, Utc};

use super::escape::{
    escape_param_value, escape_text, expand_escaped_newlines, strip_line_breaks,
};
use super::fold::fold_line;
use super::format::{format_date, format_duration, format_local, format_utc};
use crate::ical::core::{Component, ComponentKind, ContentLine, Entry, Parameter, names};
use crate::ical::model::{AlarmAction, Calendar, Event, Reminder, Trigger};
use crate::ical::tz::{TimeZoneResolver, lookup_static_zone};

const DEFAULT_STATUS: &str = "CONFIRMED";
const DEFAULT_ALARM_DESCRIPTION: &str = "Reminder";

/// How date-time values of one event are written.
#[derive(Debug, Clone, Copy)]
enum DateShape<'a> {
    /// `VALUE=DATE`, date only.
    AllDay,
    /// `TZID=...`, local wall time.
    Zoned(&'a str),
    /// UTC with a `Z` suffix.
    Utc,
}

impl<'a> DateShape<'a> {
    fn new(all_day: bool, tzid: Option<&'a str>) -> Self {
        match (all_day, tzid) {
            (true, _) => Self::AllDay,
            (false, Some(tzid)) => Self::Zoned(tzid),
            (false, None) => Self::Utc,
        }
    }

    fn line(
        self,
        name: &str,
        instants: &[DateTime<FixedOffset>],
        resolver: &mut TimeZoneResolver,
    ) -> ContentLine {
        match self {
            Self::AllDay => ContentLine::with_params(
                name,
                vec![Parameter::value_type("DATE")],
                join(instants, |i| format_date(i.date_naive())),
            ),
            Self::Zoned(tzid) => ContentLine::with_params(
                name,
                vec![Parameter::tzid(tzid)],
                join(instants, |i| format_local(&resolver.wall_time(i, tzid))),
            ),
            Self::Utc => ContentLine::new(
                name,
                join(instants, |i| format_utc(&i.with_timezone(&Utc))),
            ),
        }
    }
}

fn join<F>(instants: &[DateTime<FixedOffset>], format: F) -> String
where
    F: FnMut(&DateTime<FixedOffset>) -> String,
{
    instants.iter().map(format).collect::<Vec<_>>().join(",")
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// ## Summary
/// Serializes a calendar, using the current time where an event has no
/// creation timestamp.
#[must_use]
#[tracing::instrument(skip_all, fields(events = calendar.events().len()))]
pub fn serialize(calendar: &Calendar) -> String {
    serialize_at(calendar, Utc::now())
}

/// ## Summary
/// Serializes a calendar with `now` standing in for missing timestamps.
#[must_use]
pub fn serialize_at(calendar: &Calendar, now: DateTime<Utc>) -> String {
    let component = calendar_component(calendar, now);
    serialize_component(&component, calendar.fold_limit)
}

/// ## Summary
/// Lowers a calendar into its `VCALENDAR` component tree.
#[must_use]
pub fn calendar_component(calendar: &Calendar, now: DateTime<Utc>) -> Component {
    let mut resolver = TimeZoneResolver::new();
    let mut root = Component::new(ComponentKind::Calendar);

    root.add_property(ContentLine::new(
        names::PRODID,
        strip_line_breaks(&calendar.product_id),
    ));
    root.add_property(ContentLine::new(
        names::VERSION,
        strip_line_breaks(&calendar.version),
    ));
    root.add_property(ContentLine::new(
        names::CALSCALE,
        strip_line_breaks(&calendar.calscale),
    ));
    if let Some(method) = non_blank(calendar.method.as_deref()) {
        root.add_property(ContentLine::new(names::METHOD, strip_line_breaks(method)));
    }
    if let Some(name) = non_blank(calendar.name.as_deref()) {
        root.add_property(ContentLine::new(names::X_WR_CALNAME, escape_text(name)));
    }
    if let Some(tzid) = non_blank(calendar.default_tz.as_deref()) {
        root.add_property(ContentLine::new(names::X_WR_TIMEZONE, strip_line_breaks(tzid)));
    }

    if calendar.include_vtimezone {
        for tzid in referenced_zones(calendar) {
            match lookup_static_zone(tzid) {
                Some(zone) => root.add_child(zone.to_component(&strip_line_breaks(tzid))),
                None => tracing::warn!(tzid, "No static VTIMEZONE for zone, skipped"),
            }
        }
    }

    for event in calendar.events() {
        root.add_child(event_component(event, now, &mut resolver));
    }

    root
}

/// Unique zones of timed events, in first-seen order.
fn referenced_zones(calendar: &Calendar) -> Vec<&str> {
    let mut zones: Vec<&str> = Vec::new();
    for event in calendar.events().iter().filter(|e| !e.all_day) {
        for tzid in [event.start_zone(), event.end_zone()].into_iter().flatten() {
            if !zones.contains(&tzid) {
                zones.push(tzid);
            }
        }
    }
    zones
}

fn event_component(
    event: &Event,
    now: DateTime<Utc>,
    resolver: &mut TimeZoneResolver,
) -> Component {
    tracing::trace!(uid = %event.uid, "Serializing event");

    let mut vevent = Component::new(ComponentKind::Event);
    let stamp = event.created.unwrap_or(now);

    vevent.add_property(ContentLine::new(names::UID, strip_line_breaks(&event.uid)));
    vevent.add_property(ContentLine::new(names::DTSTAMP, format_utc(&stamp)));

    if let Some(summary) = non_blank(Some(event.summary.as_str())) {
        vevent.add_property(ContentLine::new(names::SUMMARY, escape_text(summary)));
    }
    for (name, text) in [
        (names::DESCRIPTION, event.description.as_str()),
        (names::LOCATION, event.location.as_str()),
    ] {
        if let Some(text) = non_blank(Some(text)) {
            vevent.add_property(ContentLine::new(
                name,
                escape_text(&expand_escaped_newlines(text)),
            ));
        }
    }

    let start_shape = DateShape::new(event.all_day, event.start_zone());
    vevent.add_property(start_shape.line(names::DTSTART, &[event.start], resolver));
    if event.all_day {
        // Exclusive end: the day after the last included day.
        let last_day = event
            .end
            .map_or(event.start, |end| end.max(event.start))
            .date_naive();
        let end_day = last_day.succ_opt().unwrap_or(last_day);
        vevent.add_property(ContentLine::with_params(
            names::DTEND,
            vec![Parameter::value_type("DATE")],
            format_date(end_day),
        ));
    } else if let Some(end) = event.end {
        let end_shape = DateShape::new(false, event.end_zone());
        vevent.add_property(end_shape.line(names::DTEND, &[end], resolver));
    }

    if let Some(rrule) = non_blank(event.rrule.as_deref()) {
        vevent.add_property(ContentLine::new(names::RRULE, strip_line_breaks(rrule.trim())));
    }
    if !event.exdates.is_empty() {
        vevent.add_property(start_shape.line(names::EXDATE, &event.exdates, resolver));
    }

    for attendee in event.attendees.iter().filter(|a| !a.trim().is_empty()) {
        vevent.add_property(ContentLine::new(names::ATTENDEE, cal_address(attendee)));
    }

    let categories: Vec<String> = event
        .categories
        .iter()
        .filter(|c| !c.trim().is_empty())
        .map(|c| escape_text(c.trim()))
        .collect();
    if !categories.is_empty() {
        vevent.add_property(ContentLine::new(names::CATEGORIES, categories.join(",")));
    }

    if event.priority != 0 {
        vevent.add_property(ContentLine::new(names::PRIORITY, event.priority.to_string()));
    }

    let status = non_blank(Some(event.status.as_str())).map_or_else(
        || DEFAULT_STATUS.to_string(),
        |s| strip_line_breaks(s.trim()).to_ascii_uppercase(),
    );
    vevent.add_property(ContentLine::new(names::STATUS, status));

    for reminder in &event.reminders {
        vevent.add_child(alarm_component(reminder));
    }

    if event.sequence != 0 {
        vevent.add_property(ContentLine::new(names::SEQUENCE, event.sequence.to_string()));
    }
    vevent.add_property(ContentLine::new(names::CREATED, format_utc(&stamp)));
    vevent.add_property(ContentLine::new(
        names::LAST_MODIFIED,
        format_utc(&event.modified.unwrap_or(stamp)),
    ));

    vevent
}

/// Attendee entries without a URI scheme are treated as email addresses.
fn cal_address(entry: &str) -> String {
    let cleaned = strip_line_breaks(entry);
    let trimmed = cleaned.trim();
    let has_scheme = trimmed.split_once(':').is_some_and(|(scheme, _)| {
        !scheme.is_empty()
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    });
    if has_scheme {
        trimmed.to_string()
    } else {
        format!("mailto:{trimmed}")
    }
}

fn alarm_component(reminder: &Reminder) -> Component {
    let mut valarm = Component::new(ComponentKind::Alarm);

    valarm.add_property(ContentLine::new(names::ACTION, reminder.action.as_str()));

    let trigger = match reminder.trigger {
        Trigger::Relative(offset) => ContentLine::new(names::TRIGGER, format_duration(offset)),
        Trigger::Absolute(at) => ContentLine::with_params(
            names::TRIGGER,
            vec![Parameter::value_type("DATE-TIME")],
            format_utc(&at),
        ),
    };
    valarm.add_property(trigger);

    let description = non_blank(Some(reminder.description.as_str())).map(escape_text);
    let description = match reminder.action {
        AlarmAction::Display => {
            Some(description.unwrap_or_else(|| DEFAULT_ALARM_DESCRIPTION.to_string()))
        }
        AlarmAction::Email => description,
    };
    if let Some(description) = description {
        valarm.add_property(ContentLine::new(names::DESCRIPTION, description));
    }

    if let Some(summary) = non_blank(Some(reminder.summary.as_str())) {
        valarm.add_property(ContentLine::new(names::SUMMARY, escape_text(summary)));
    }

    if let Some(repeat) = reminder.repeat {
        if repeat.count() > 0 && repeat.interval() > TimeDelta::zero() {
            valarm.add_property(ContentLine::new(names::REPEAT, repeat.count().to_string()));
            valarm.add_property(ContentLine::new(
                names::DURATION,
                format_duration(repeat.interval()),
            ));
        }
    }

    valarm
}

/// ## Summary
/// Writes a component and its entries, each line folded at `fold_limit`.
#[must_use]
pub fn serialize_component(component: &Component, fold_limit: usize) -> String {
    let mut out = String::new();
    write_component(&mut out, component, fold_limit);
    out
}

fn write_component(out: &mut String, component: &Component, fold_limit: usize) {
    out.push_str(&fold_line(&format!("BEGIN:{}", component.kind), fold_limit));
    for entry in &component.entries {
        match entry {
            Entry::Property(line) => out.push_str(&serialize_property(line, fold_limit)),
            Entry::Component(child) => write_component(out, child, fold_limit),
        }
    }
    out.push_str(&fold_line(&format!("END:{}", component.kind), fold_limit));
}

/// ## Summary
/// Writes one property as `NAME[;PARAM=VALUE...]:VALUE`, folded and
/// CRLF-terminated.
#[must_use]
pub fn serialize_property(line: &ContentLine, fold_limit: usize) -> String {
    let mut logical = line.name.clone();
    for param in &line.params {
        logical.push(';');
        logical.push_str(&param.name);
        logical.push('=');
        logical.push_str(&escape_param_value(&param.value));
    }
    logical.push(':');
    logical.push_str(&line.value);
    fold_line(&logical, fold_limit)
}
