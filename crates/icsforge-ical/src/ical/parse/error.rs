//! Input parse error types.

use std::fmt;

/// Result type for input parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// An error that occurred while parsing user-entered text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// Additional context or message.
    pub message: String,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(kind: ParseErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates an empty-input error.
    #[must_use]
    pub fn empty(what: &str) -> Self {
        Self::new(ParseErrorKind::EmptyInput, format!("empty {what}"))
    }

    /// Creates an invalid duration error.
    #[must_use]
    pub fn invalid_duration(input: &str) -> Self {
        Self::new(ParseErrorKind::InvalidDuration, format!("{input:?}"))
    }

    /// Creates an invalid timestamp error.
    #[must_use]
    pub fn invalid_timestamp(input: &str) -> Self {
        Self::new(ParseErrorKind::InvalidDateTime, format!("{input:?}"))
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ParseError {}

/// The kind of parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Input was empty after trimming.
    EmptyInput,
    /// Unparseable duration.
    InvalidDuration,
    /// Unparseable timestamp.
    InvalidDateTime,
    /// Alarm spec that is neither a duration, a timestamp nor `key=value` pairs.
    InvalidAlarm,
    /// Alarm parameter with an unrecognized key.
    UnknownParameter,
    /// Alarm parameter with a value outside its vocabulary.
    InvalidParameterValue,
    /// Required alarm parameter absent.
    MissingParameter,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "empty input"),
            Self::InvalidDuration => write!(f, "invalid duration"),
            Self::InvalidDateTime => write!(f, "invalid date/time"),
            Self::InvalidAlarm => write!(f, "invalid alarm"),
            Self::UnknownParameter => write!(f, "unknown alarm parameter"),
            Self::InvalidParameterValue => write!(f, "invalid alarm parameter value"),
            Self::MissingParameter => write!(f, "missing alarm parameter"),
        }
    }
}
