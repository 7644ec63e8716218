//! Alarm specification language.
//!
//! A raw alarm string holds one or more specs separated by newlines or
//! `||`. Specs without `=` may also be separated by `,`, `;` or `|`.
//!
//! Each spec is either simple (`15m`, `PT1H`, `2026-03-01 09:00`) or a
//! list of `key=value` pairs:
//!
//! ```text
//! trigger=30m,direction=after,description=Stretch
//! trigger=2026-03-01 09:00,kind=absolute
//! trigger=15m,repeat=3,repeat_duration=5m
//! ```

use chrono::{DateTime, TimeDelta, Utc};

use super::datetime::parse_datetime;
use super::duration::parse_duration;
use super::error::{ParseError, ParseErrorKind};
use crate::error::{IcalError, IcalResult};
use crate::ical::model::{AlarmAction, Reminder, Repeat, Trigger};

/// Description given to reminders built from simple specs.
const DEFAULT_DESCRIPTION: &str = "Reminder";

/// Recognized parameter keys. Synonyms collapse onto one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AlarmKey {
    Trigger,
    Action,
    Description,
    Summary,
    Direction,
    Kind,
    Relative,
    Repeat,
    RepeatDuration,
}

impl AlarmKey {
    fn parse(key: &str) -> Option<Self> {
        match key {
            "trigger" | "offset" => Some(Self::Trigger),
            "action" => Some(Self::Action),
            "description" | "message" | "text" => Some(Self::Description),
            "summary" | "title" => Some(Self::Summary),
            "direction" | "when" => Some(Self::Direction),
            "kind" => Some(Self::Kind),
            "relative" | "is_relative" => Some(Self::Relative),
            "repeat" | "repetitions" => Some(Self::Repeat),
            "repeat_duration" | "repeat_interval" => Some(Self::RepeatDuration),
            _ => None,
        }
    }
}

/// Sign applied to a relative trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Before,
    After,
}

impl Direction {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "after" | "post" | "later" | "follow" | "following" | "plus" => Some(Self::After),
            "before" | "prior" | "pre" | "minus" => Some(Self::Before),
            _ => None,
        }
    }

    fn apply(self, offset: TimeDelta) -> TimeDelta {
        match self {
            Self::Before => -offset.abs(),
            Self::After => offset.abs(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TriggerKind {
    Relative,
    Before,
    After,
    Absolute,
}

impl TriggerKind {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "relative" => Some(Self::Relative),
            "before" => Some(Self::Before),
            "after" => Some(Self::After),
            "absolute" | "at" | "on" => Some(Self::Absolute),
            _ => None,
        }
    }

    const fn direction(self) -> Option<Direction> {
        match self {
            Self::Before => Some(Direction::Before),
            Self::After => Some(Direction::After),
            Self::Relative | Self::Absolute => None,
        }
    }
}

/// How the trigger text is to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Relative,
    Absolute,
    /// Relative first, absolute if that fails.
    Auto,
}

/// Parameters collected from a key-value spec.
#[derive(Debug, Default)]
struct AlarmParams<'a> {
    trigger: Option<&'a str>,
    action: Option<AlarmAction>,
    description: Option<&'a str>,
    summary: Option<&'a str>,
    direction: Option<Direction>,
    kind: Option<TriggerKind>,
    relative: Option<bool>,
    repeat: Option<u32>,
    repeat_duration: Option<TimeDelta>,
}

impl<'a> AlarmParams<'a> {
    fn collect(spec: &'a str) -> IcalResult<Self> {
        let mut params = Self::default();

        for pair in spec.split([',', ';']) {
            let pair = pair.trim();
            if pair.is_empty() {
                continue;
            }
            let (raw_key, value) = pair.split_once('=').ok_or_else(|| {
                ParseError::new(
                    ParseErrorKind::InvalidAlarm,
                    format!("expected key=value, found {pair:?}"),
                )
            })?;
            let raw_key = raw_key.trim().to_ascii_lowercase();
            let value = value.trim();

            let key = AlarmKey::parse(&raw_key).ok_or_else(|| {
                ParseError::new(ParseErrorKind::UnknownParameter, format!("{raw_key:?}"))
            })?;
            params.set(key, &raw_key, value)?;
        }

        Ok(params)
    }

    fn set(&mut self, key: AlarmKey, raw_key: &str, value: &'a str) -> IcalResult<()> {
        let lowered = value.to_ascii_lowercase();
        let invalid = || {
            ParseError::new(
                ParseErrorKind::InvalidParameterValue,
                format!("{raw_key}={value:?}"),
            )
        };

        match key {
            AlarmKey::Trigger => self.trigger = Some(value),
            AlarmKey::Action => {
                self.action = Some(match lowered.as_str() {
                    "display" => AlarmAction::Display,
                    "email" => AlarmAction::Email,
                    _ => return Err(invalid().into()),
                });
            }
            AlarmKey::Description => self.description = Some(value),
            AlarmKey::Summary => self.summary = Some(value),
            AlarmKey::Direction => {
                self.direction = Some(Direction::parse(&lowered).ok_or_else(invalid)?);
            }
            AlarmKey::Kind => {
                self.kind = Some(TriggerKind::parse(&lowered).ok_or_else(invalid)?);
            }
            AlarmKey::Relative => {
                self.relative = Some(parse_bool(&lowered).ok_or_else(invalid)?);
            }
            AlarmKey::Repeat => {
                let count = lowered.parse::<u32>().map_err(|_e| invalid())?;
                if count == 0 {
                    return Err(IcalError::ValidationError(format!(
                        "{raw_key} must be positive"
                    )));
                }
                self.repeat = Some(count);
            }
            AlarmKey::RepeatDuration => {
                let interval = parse_duration(value)?;
                if interval <= TimeDelta::zero() {
                    return Err(IcalError::ValidationError(format!(
                        "{raw_key} must be positive"
                    )));
                }
                self.repeat_duration = Some(interval);
            }
        }
        Ok(())
    }

    /// Explicit `relative=` wins, then `kind=`, else auto-detect.
    fn mode(&self) -> Mode {
        match (self.relative, self.kind) {
            (Some(true), _) => Mode::Relative,
            (Some(false), _) => Mode::Absolute,
            (None, Some(TriggerKind::Absolute)) => Mode::Absolute,
            (None, Some(_)) => Mode::Relative,
            (None, None) => Mode::Auto,
        }
    }

    fn direction(&self) -> Option<Direction> {
        self.direction.or_else(|| self.kind.and_then(TriggerKind::direction))
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" | "yes" | "y" | "1" | "on" => Some(true),
        "false" | "no" | "n" | "0" | "off" => Some(false),
        _ => None,
    }
}

/// ## Summary
/// Splits raw alarm input into individual spec strings.
///
/// Splits on newlines (any convention), then on `||`, then, for specs that
/// contain no `=`, on `,`, `;` and `|`. Blank specs are dropped.
#[must_use]
pub fn split_input(raw: &str) -> Vec<String> {
    let normalized = raw.replace("\r\n", "\n").replace('\r', "\n");
    let mut specs = Vec::new();
    for line in normalized.split('\n') {
        split_piece(line, &mut specs);
    }
    specs
}

fn split_piece(piece: &str, specs: &mut Vec<String>) {
    if let Some((head, tail)) = piece.split_once("||") {
        split_piece(head, specs);
        split_piece(tail, specs);
        return;
    }

    if piece.contains('=') {
        push_trimmed(piece, specs);
    } else {
        for part in piece.split([',', ';', '|']) {
            push_trimmed(part, specs);
        }
    }
}

fn push_trimmed(piece: &str, specs: &mut Vec<String>) {
    let trimmed = piece.trim();
    if !trimmed.is_empty() {
        specs.push(trimmed.to_string());
    }
}

/// ## Summary
/// Parses a list of specs into reminders, in order.
///
/// ## Errors
/// Returns the first error produced by [`parse_spec`].
pub fn parse_specs<S: AsRef<str>>(
    specs: &[S],
    default_tz: Option<&str>,
) -> IcalResult<Vec<Reminder>> {
    specs
        .iter()
        .map(|spec| parse_spec(spec.as_ref(), default_tz))
        .collect()
}

/// ## Summary
/// Splits and parses raw alarm input.
///
/// ## Errors
/// Returns the first error produced by [`parse_spec`].
pub fn parse_alarms(raw: &str, default_tz: Option<&str>) -> IcalResult<Vec<Reminder>> {
    parse_specs(&split_input(raw), default_tz)
}

/// ## Summary
/// Parses one alarm spec.
///
/// Zone-less absolute timestamps are read in `default_tz`.
///
/// ## Errors
/// Returns `IcalError::ParseError` for malformed specs and
/// `IcalError::ValidationError` for a zero relative trigger, non-positive
/// repeat values, or a repeat count without an interval (or vice versa).
pub fn parse_spec(spec: &str, default_tz: Option<&str>) -> IcalResult<Reminder> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Err(ParseError::empty("alarm spec").into());
    }

    let reminder = if spec.contains('=') {
        parse_key_value(spec, default_tz)?
    } else {
        parse_simple(spec, default_tz)?
    };
    tracing::debug!(spec, trigger = ?reminder.trigger, "Parsed alarm spec");
    Ok(reminder)
}

fn parse_simple(spec: &str, default_tz: Option<&str>) -> IcalResult<Reminder> {
    let trigger = match parse_duration(spec) {
        Ok(offset) => Trigger::Relative(signed_offset(spec, offset, None)?),
        Err(duration_err) => match parse_datetime(spec, default_tz) {
            Ok(at) => Trigger::Absolute(at.with_timezone(&Utc)),
            Err(_) => {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidAlarm,
                    format!("{spec:?} is neither a duration nor a timestamp ({duration_err})"),
                )
                .into());
            }
        },
    };

    Ok(Reminder::new(trigger).with_description(DEFAULT_DESCRIPTION))
}

fn parse_key_value(spec: &str, default_tz: Option<&str>) -> IcalResult<Reminder> {
    let params = AlarmParams::collect(spec)?;

    let trigger_text = params
        .trigger
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ParseError::new(ParseErrorKind::MissingParameter, "trigger"))?;

    let trigger = match params.mode() {
        Mode::Relative => {
            let offset = parse_duration(trigger_text)?;
            Trigger::Relative(signed_offset(trigger_text, offset, params.direction())?)
        }
        Mode::Absolute => Trigger::Absolute(absolute(trigger_text, default_tz)?),
        Mode::Auto => match parse_duration(trigger_text) {
            Ok(offset) => {
                Trigger::Relative(signed_offset(trigger_text, offset, params.direction())?)
            }
            Err(_) => Trigger::Absolute(absolute(trigger_text, default_tz)?),
        },
    };

    let repeat = match (params.repeat, params.repeat_duration) {
        (Some(count), Some(interval)) => Some(Repeat::new(count, interval)?),
        (None, None) => None,
        (Some(_), None) => {
            return Err(IcalError::ValidationError(
                "alarm repeat requires repeat_duration".to_string(),
            ));
        }
        (None, Some(_)) => {
            return Err(IcalError::ValidationError(
                "alarm repeat_duration requires repeat".to_string(),
            ));
        }
    };

    Ok(Reminder {
        action: params.action.unwrap_or_default(),
        summary: params.summary.unwrap_or_default().to_string(),
        description: params.description.unwrap_or_default().to_string(),
        trigger,
        repeat,
    })
}

fn absolute(text: &str, default_tz: Option<&str>) -> IcalResult<DateTime<Utc>> {
    Ok(parse_datetime(text, default_tz)?.with_timezone(&Utc))
}

/// Direction wins; otherwise an explicit sign in the text is kept; otherwise
/// the trigger fires before the start.
fn signed_offset(
    text: &str,
    offset: TimeDelta,
    direction: Option<Direction>,
) -> IcalResult<TimeDelta> {
    if offset.is_zero() {
        return Err(IcalError::ValidationError(format!(
            "relative alarm trigger {text:?} must not be zero"
        )));
    }

    let explicit_sign = text.trim_start().starts_with(['+', '-']);
    Ok(match direction {
        Some(direction) => direction.apply(offset),
        None if explicit_sign => offset,
        None => Direction::Before.apply(offset),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn minutes(n: i64) -> TimeDelta {
        TimeDelta::minutes(n)
    }

    #[test]
    fn split_keeps_key_value_specs_whole() {
        assert_eq!(split_input("15m,trigger=30m"), ["15m,trigger=30m"]);
        assert_eq!(
            split_input("trigger=30m,direction=after;description=x"),
            ["trigger=30m,direction=after;description=x"]
        );
    }

    #[test]
    fn split_on_double_pipe() {
        assert_eq!(split_input("15m||30m"), ["15m", "30m"]);
        assert_eq!(
            split_input("trigger=1h,action=email||10m,5m"),
            ["trigger=1h,action=email", "10m", "5m"]
        );
    }

    #[test]
    fn split_on_newlines_and_simple_separators() {
        assert_eq!(
            split_input("15m\r\n30m;1h\r2h|3h\n\n  \n"),
            ["15m", "30m", "1h", "2h", "3h"]
        );
    }

    #[test]
    fn split_blank_input() {
        assert!(split_input("").is_empty());
        assert!(split_input(" ,, || \n").is_empty());
    }

    #[test]
    fn simple_duration_fires_before() {
        let reminder = parse_spec("15m", None).unwrap();
        assert_eq!(reminder.trigger, Trigger::Relative(minutes(-15)));
        assert_eq!(reminder.action, AlarmAction::Display);
        assert_eq!(reminder.description, "Reminder");
        assert!(reminder.repeat.is_none());
    }

    #[test]
    fn simple_duration_with_explicit_sign() {
        let after = parse_spec("+10m", None).unwrap();
        assert_eq!(after.trigger, Trigger::Relative(minutes(10)));
        let before = parse_spec("-PT1H", None).unwrap();
        assert_eq!(before.trigger, Trigger::Relative(minutes(-60)));
    }

    #[test]
    fn simple_zero_is_rejected() {
        assert!(matches!(
            parse_spec("0", None),
            Err(IcalError::ValidationError(_))
        ));
    }

    #[test]
    fn simple_timestamp_is_absolute_utc() {
        let reminder = parse_spec("2026-03-01 09:00", Some("Europe/Berlin")).unwrap();
        assert_eq!(
            reminder.trigger,
            Trigger::Absolute(Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap())
        );
    }

    #[test]
    fn simple_garbage_is_rejected() {
        let err = parse_spec("whenever", None).unwrap_err();
        assert!(matches!(
            err,
            IcalError::ParseError(ParseError {
                kind: ParseErrorKind::InvalidAlarm,
                ..
            })
        ));
    }

    #[test]
    fn key_value_full() {
        let reminder = parse_spec(
            "trigger=30m,direction=after,action=email,message=Stretch,title=Break",
            None,
        )
        .unwrap();
        assert_eq!(reminder.trigger, Trigger::Relative(minutes(30)));
        assert_eq!(reminder.action, AlarmAction::Email);
        assert_eq!(reminder.description, "Stretch");
        assert_eq!(reminder.summary, "Break");
    }

    #[test]
    fn key_value_defaults() {
        let reminder = parse_spec("offset=1h", None).unwrap();
        assert_eq!(reminder.trigger, Trigger::Relative(minutes(-60)));
        assert_eq!(reminder.action, AlarmAction::Display);
        assert!(reminder.description.is_empty());
    }

    #[test]
    fn direction_synonyms() {
        for word in ["after", "post", "later", "follow", "following", "plus"] {
            let reminder = parse_spec(&format!("trigger=5m;when={word}"), None).unwrap();
            assert_eq!(reminder.trigger, Trigger::Relative(minutes(5)), "{word}");
        }
        for word in ["before", "prior", "pre", "minus"] {
            let reminder = parse_spec(&format!("trigger=+5m;direction={word}"), None).unwrap();
            assert_eq!(reminder.trigger, Trigger::Relative(minutes(-5)), "{word}");
        }
    }

    #[test]
    fn kind_sets_sign_and_mode() {
        let after = parse_spec("trigger=5m,kind=after", None).unwrap();
        assert_eq!(after.trigger, Trigger::Relative(minutes(5)));

        let before = parse_spec("trigger=5m,kind=before", None).unwrap();
        assert_eq!(before.trigger, Trigger::Relative(minutes(-5)));

        // direction beats the sign implied by kind
        let mixed = parse_spec("trigger=5m,kind=before,direction=after", None).unwrap();
        assert_eq!(mixed.trigger, Trigger::Relative(minutes(5)));
    }

    #[test]
    fn kind_absolute_forces_timestamp() {
        let reminder = parse_spec("trigger=2026-03-01T09:00:00Z,kind=at", None).unwrap();
        assert_eq!(
            reminder.trigger,
            Trigger::Absolute(Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap())
        );

        // a duration is not a timestamp
        assert!(parse_spec("trigger=15m,kind=absolute", None).is_err());
    }

    #[test]
    fn kind_relative_rejects_timestamp() {
        assert!(parse_spec("trigger=2026-03-01T09:00:00Z,kind=relative", None).is_err());
    }

    #[test]
    fn relative_flag_wins_over_kind() {
        let reminder =
            parse_spec("trigger=2026-03-01T09:00:00Z,kind=before,relative=no", None).unwrap();
        assert!(matches!(reminder.trigger, Trigger::Absolute(_)));

        let reminder = parse_spec("trigger=15m,kind=absolute,is_relative=true", None).unwrap();
        assert_eq!(reminder.trigger, Trigger::Relative(minutes(-15)));
    }

    #[test]
    fn auto_mode_falls_back_to_absolute() {
        let reminder =
            parse_spec("trigger=2026-03-01 09:00,description=Call", Some("UTC")).unwrap();
        assert_eq!(
            reminder.trigger,
            Trigger::Absolute(Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap())
        );
    }

    #[test]
    fn zero_relative_trigger_is_rejected() {
        assert!(matches!(
            parse_spec("trigger=0", None),
            Err(IcalError::ValidationError(_))
        ));
        assert!(matches!(
            parse_spec("trigger=PT0S,kind=relative", None),
            Err(IcalError::ValidationError(_))
        ));
    }

    #[test]
    fn repeat_requires_interval() {
        assert!(matches!(
            parse_spec("trigger=15m,repeat=3", None),
            Err(IcalError::ValidationError(_))
        ));
        assert!(matches!(
            parse_spec("trigger=15m,repeat_interval=5m", None),
            Err(IcalError::ValidationError(_))
        ));
    }

    #[test]
    fn repeat_with_interval() {
        let reminder = parse_spec("trigger=15m,repeat=3,repeat_duration=5m", None).unwrap();
        let repeat = reminder.repeat.expect("repeat");
        assert_eq!(repeat.count(), 3);
        assert_eq!(repeat.interval(), minutes(5));

        let reminder = parse_spec("trigger=15m;repetitions=2;repeat_interval=PT10M", None).unwrap();
        assert_eq!(reminder.repeat.map(|r| r.count()), Some(2));
    }

    #[test]
    fn repeat_values_must_be_positive() {
        assert!(parse_spec("trigger=15m,repeat=0,repeat_duration=5m", None).is_err());
        assert!(parse_spec("trigger=15m,repeat=-1,repeat_duration=5m", None).is_err());
        assert!(parse_spec("trigger=15m,repeat=2,repeat_duration=0", None).is_err());
    }

    #[test]
    fn key_value_errors() {
        let missing = parse_spec("description=hello", None).unwrap_err();
        assert!(matches!(
            missing,
            IcalError::ParseError(ParseError {
                kind: ParseErrorKind::MissingParameter,
                ..
            })
        ));

        let unknown = parse_spec("trigger=15m,colour=red", None).unwrap_err();
        assert!(matches!(
            unknown,
            IcalError::ParseError(ParseError {
                kind: ParseErrorKind::UnknownParameter,
                ..
            })
        ));

        for spec in [
            "trigger=15m,action=audio",
            "trigger=15m,direction=sideways",
            "trigger=15m,kind=sometimes",
            "trigger=15m,relative=maybe",
        ] {
            let err = parse_spec(spec, None).unwrap_err();
            assert!(
                matches!(
                    err,
                    IcalError::ParseError(ParseError {
                        kind: ParseErrorKind::InvalidParameterValue,
                        ..
                    })
                ),
                "{spec}"
            );
        }

        assert!(parse_spec("trigger=15m,stray", None).is_err());
    }

    #[test]
    fn parse_specs_in_order() {
        let reminders = parse_specs(&split_input("15m||trigger=1h,direction=after"), None).unwrap();
        assert_eq!(reminders.len(), 2);
        assert_eq!(reminders[0].trigger, Trigger::Relative(minutes(-15)));
        assert_eq!(reminders[1].trigger, Trigger::Relative(minutes(60)));
    }

    #[test]
    fn parse_specs_stops_at_first_error() {
        assert!(parse_specs(&["15m", "nonsense"], None).is_err());
    }

    #[test_log::test]
    fn parse_alarms_combines_split_and_parse() {
        let reminders = parse_alarms("10m, 1h\ntrigger=2h,repeat=2,repeat_duration=15m", None)
            .unwrap();
        assert_eq!(reminders.len(), 3);
        assert!(reminders[2].repeat.is_some());
    }
}
