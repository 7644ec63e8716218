//! iCalendar serialization (RFC 5545).
//!
//! This module provides serializers for iCalendar content:
//! - Escape: Text and parameter value escaping
//! - Fold: Content line folding at 75 octets
//! - Format: DATE, DATE-TIME and DURATION value text
//! - Serializer: Calendar lowering and document output

mod escape;
mod fold;
mod format;
mod serializer;

pub use escape::{escape_param_value, escape_text, expand_escaped_newlines, strip_line_breaks};
pub use fold::{MAX_LINE_OCTETS, fold_line, fold_segments};
pub use format::{format_date, format_duration, format_local, format_utc};
pub use serializer::{
    calendar_component, serialize, serialize_at, serialize_component, serialize_property,
};
