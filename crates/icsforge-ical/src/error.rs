use thiserror::Error;

use crate::ical::parse::ParseError;

/// Calendar encoding and input parsing errors
#[derive(Error, Debug)]
pub enum IcalError {
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    CoreError(#[from] icsforge_core::error::CoreError),
}

pub type IcalResult<T> = std::result::Result<T, IcalError>;
