//! Whole-document output tests for the iCalendar encoder.
