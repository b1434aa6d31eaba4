//! Error types for daybook.

use thiserror::Error;

/// Errors that can occur in daybook operations.
///
/// Malformed dates and times are not errors: they surface as
/// [`Timestamp::Invalid`](crate::overlap::Timestamp::Invalid) and simply never overlap.
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CalendarError {
    fn from(e: serde_json::Error) -> Self {
        CalendarError::Serialization(e.to_string())
    }
}

/// Result type alias for daybook operations.
pub type CalResult<T> = Result<T, CalendarError>;
