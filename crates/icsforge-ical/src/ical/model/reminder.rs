//! Reminders (`VALARM`) attached to events.

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::{IcalError, IcalResult};

/// Action performed when a reminder fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlarmAction {
    #[default]
    Display,
    Email,
}

impl AlarmAction {
    /// Returns the `ACTION` property value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Display => "DISPLAY",
            Self::Email => "EMAIL",
        }
    }
}

impl std::fmt::Display for AlarmAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// When a reminder fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Offset from the event start; negative fires before it.
    Relative(TimeDelta),
    /// Fixed instant.
    Absolute(DateTime<Utc>),
}

/// Repetition of a fired reminder. Count and interval only exist together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Repeat {
    count: u32,
    interval: TimeDelta,
}

impl Repeat {
    /// ## Summary
    /// Pairs a repeat count with the interval between repetitions.
    ///
    /// ## Errors
    /// Returns `IcalError::ValidationError` if either value is not positive.
    pub fn new(count: u32, interval: TimeDelta) -> IcalResult<Self> {
        if count == 0 {
            return Err(IcalError::ValidationError(
                "alarm repeat count must be positive".to_string(),
            ));
        }
        if interval <= TimeDelta::zero() {
            return Err(IcalError::ValidationError(
                "alarm repeat interval must be positive".to_string(),
            ));
        }
        Ok(Self { count, interval })
    }

    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    #[must_use]
    pub const fn interval(&self) -> TimeDelta {
        self.interval
    }
}

/// A reminder attached to an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub action: AlarmAction,
    pub summary: String,
    pub description: String,
    pub trigger: Trigger,
    pub repeat: Option<Repeat>,
}

impl Reminder {
    /// Display reminder firing `before` ahead of the event start.
    #[must_use]
    pub fn before(before: TimeDelta) -> Self {
        Self::new(Trigger::Relative(-before.abs()))
    }

    /// Display reminder with the given trigger and no text.
    #[must_use]
    pub fn new(trigger: Trigger) -> Self {
        Self {
            action: AlarmAction::Display,
            summary: String::new(),
            description: String::new(),
            trigger,
            repeat: None,
        }
    }

    #[must_use]
    pub fn with_action(mut self, action: AlarmAction) -> Self {
        self.action = action;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    #[must_use]
    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = Some(repeat);
        self
    }
}
