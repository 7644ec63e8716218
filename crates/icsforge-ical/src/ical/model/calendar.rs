//! The calendar envelope (`VCALENDAR`).

use icsforge_core::config::CalendarConfig;
use icsforge_core::constants::{
    CALSCALE_GREGORIAN, DEFAULT_FOLD_LIMIT, ICAL_VERSION, METHOD_PUBLISH, PRODUCT_ID,
};

use super::Event;
use crate::error::IcalResult;

/// A named collection of events plus envelope metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar {
    pub product_id: String,
    pub version: String,
    pub calscale: String,
    pub method: Option<String>,
    pub name: Option<String>,
    pub default_tz: Option<String>,
    pub include_vtimezone: bool,
    /// Line folding limit in octets; `0` disables folding.
    pub fold_limit: usize,
    events: Vec<Event>,
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new()
    }
}

impl Calendar {
    /// Creates an empty calendar with the built-in defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            product_id: PRODUCT_ID.to_string(),
            version: ICAL_VERSION.to_string(),
            calscale: CALSCALE_GREGORIAN.to_string(),
            method: Some(METHOD_PUBLISH.to_string()),
            name: None,
            default_tz: None,
            include_vtimezone: false,
            fold_limit: DEFAULT_FOLD_LIMIT,
            events: Vec::new(),
        }
    }

    /// ## Summary
    /// Creates an empty calendar from configuration.
    ///
    /// ## Errors
    /// Returns an error if the configuration fails validation.
    pub fn from_config(config: &CalendarConfig) -> IcalResult<Self> {
        config.validate()?;
        Ok(Self {
            product_id: config.product_id.clone(),
            version: config.version.clone(),
            calscale: config.calscale.clone(),
            method: config.method.clone(),
            name: config.name.clone(),
            default_tz: config.default_timezone.clone(),
            include_vtimezone: config.include_vtimezone,
            fold_limit: config.fold_limit,
            events: Vec::new(),
        })
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_vtimezones(mut self, include: bool) -> Self {
        self.include_vtimezone = include;
        self
    }

    /// ## Summary
    /// Appends an event.
    ///
    /// When no default timezone is set and this is the first event, a timed
    /// event whose start and end zones agree supplies it. A mismatched pair
    /// never does.
    pub fn add_event(&mut self, event: Event) {
        if self.default_tz.is_none() && self.events.is_empty() && !event.all_day {
            match (event.start_zone(), event.end_zone()) {
                (Some(start), Some(end)) if start == end => {
                    tracing::debug!(tzid = start, "Default timezone taken from first event");
                    self.default_tz = Some(start.to_string());
                }
                _ => {}
            }
        }
        self.events.push(event);
    }

    /// Events in insertion order.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }
}
