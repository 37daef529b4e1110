//! Error types for the calendar subsystem.

use thiserror::Error;

use crate::event::EventId;

/// Errors that can occur in uwscal operations.
#[derive(Error, Debug)]
pub enum CalError {
    /// A raw event record could not be turned into an [`Event`](crate::Event).
    #[error("Malformed event record: {reason}")]
    DataFormat { id: Option<EventId>, reason: String },

    #[error("Event not found: {0}")]
    NotFound(EventId),

    #[error("Failed to load events: {0}")]
    LoadFailure(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CalError {
    pub fn data_format(id: Option<EventId>, reason: impl Into<String>) -> Self {
        CalError::DataFormat {
            id,
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for CalError {
    fn from(err: serde_json::Error) -> Self {
        CalError::Serialization(err.to_string())
    }
}

/// Result type alias for uwscal operations.
pub type CalResult<T> = Result<T, CalError>;
