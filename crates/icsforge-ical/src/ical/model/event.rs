//! Schedulable events (`VEVENT`).

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use uuid::Uuid;

use super::Reminder;
use crate::error::{IcalError, IcalResult};

/// One calendar event.
///
/// The model stores what it is given; `validate` is the check callers run
/// before handing an event to a calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub uid: String,
    pub summary: String,
    pub description: String,
    pub location: String,
    pub start: DateTime<FixedOffset>,
    /// End instant. For all-day events this is the last *included* day.
    pub end: Option<DateTime<FixedOffset>>,
    pub start_tz: Option<String>,
    /// Zone of the end instant when it differs from the start zone.
    pub end_tz: Option<String>,
    pub all_day: bool,
    pub attendees: Vec<String>,
    pub categories: Vec<String>,
    /// 0 means unset.
    pub priority: u8,
    /// Blank means `CONFIRMED`.
    pub status: String,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    pub sequence: u32,
    pub rrule: Option<String>,
    pub exdates: Vec<DateTime<FixedOffset>>,
    pub reminders: Vec<Reminder>,
}

impl Event {
    /// ## Summary
    /// Creates a timed event with a fresh UID and creation timestamps.
    #[must_use]
    pub fn new(
        summary: impl Into<String>,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Self {
        let now = Utc::now();
        Self {
            uid: Uuid::new_v4().to_string(),
            summary: summary.into(),
            description: String::new(),
            location: String::new(),
            start,
            end: Some(end),
            start_tz: None,
            end_tz: None,
            all_day: false,
            attendees: Vec::new(),
            categories: Vec::new(),
            priority: 0,
            status: String::new(),
            created: Some(now),
            modified: Some(now),
            sequence: 0,
            rrule: None,
            exdates: Vec::new(),
            reminders: Vec::new(),
        }
    }

    /// ## Summary
    /// Creates an all-day event spanning `first_day` through `last_day`
    /// inclusive (a single day when `last_day` is `None`).
    #[must_use]
    pub fn all_day(
        summary: impl Into<String>,
        first_day: NaiveDate,
        last_day: Option<NaiveDate>,
    ) -> Self {
        let start = midnight(first_day);
        let mut event = Self::new(summary, start, start);
        event.end = last_day.map(midnight);
        event.all_day = true;
        event
    }

    #[must_use]
    pub fn with_timezone(mut self, tzid: impl Into<String>) -> Self {
        self.start_tz = Some(tzid.into());
        self
    }

    #[must_use]
    pub fn with_end_timezone(mut self, tzid: impl Into<String>) -> Self {
        self.end_tz = Some(tzid.into());
        self
    }

    #[must_use]
    pub fn with_reminder(mut self, reminder: Reminder) -> Self {
        self.reminders.push(reminder);
        self
    }

    #[must_use]
    pub fn with_exdate(mut self, instant: DateTime<FixedOffset>) -> Self {
        self.exdates.push(instant);
        self
    }

    pub fn add_reminder(&mut self, reminder: Reminder) {
        self.reminders.push(reminder);
    }

    /// Adds an exception instant. For all-day events pass a date-only
    /// instant, e.g. from [`Event::date_instant`].
    pub fn add_exdate(&mut self, instant: DateTime<FixedOffset>) {
        self.exdates.push(instant);
    }

    /// Records a revision: bumps `SEQUENCE` and the modification time.
    pub fn touch(&mut self) {
        self.sequence = self.sequence.saturating_add(1);
        self.modified = Some(Utc::now());
    }

    /// Zone of the start instant, if any.
    #[must_use]
    pub fn start_zone(&self) -> Option<&str> {
        non_blank(self.start_tz.as_deref())
    }

    /// Zone of the end instant: the explicit end zone, else the start zone.
    #[must_use]
    pub fn end_zone(&self) -> Option<&str> {
        non_blank(self.end_tz.as_deref()).or_else(|| self.start_zone())
    }

    /// Midnight instant used to store a date-only value.
    #[must_use]
    pub fn date_instant(day: NaiveDate) -> DateTime<FixedOffset> {
        midnight(day)
    }

    /// ## Summary
    /// Checks the ordering of start and end.
    ///
    /// ## Errors
    /// Returns `IcalError::ValidationError` if a timed event does not end
    /// strictly after it starts, or an all-day event ends before its first day.
    pub fn validate(&self) -> IcalResult<()> {
        let Some(end) = self.end else {
            return Ok(());
        };

        if self.all_day {
            if end.date_naive() < self.start.date_naive() {
                return Err(IcalError::ValidationError(format!(
                    "event {:?} ends on {} before it starts on {}",
                    self.summary,
                    end.date_naive(),
                    self.start.date_naive()
                )));
            }
        } else if end <= self.start {
            return Err(IcalError::ValidationError(format!(
                "event {:?} must end after {} (ends {})",
                self.summary, self.start, end
            )));
        }
        Ok(())
    }
}

fn midnight(day: NaiveDate) -> DateTime<FixedOffset> {
    Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN))
        .fixed_offset()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
