use crate::backend::BackendError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LogReadError {
    // Caller input
    #[error("invalid {field} '{value}': expected an ISO-8601 timestamp")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("invalid page limit {limit}: must be between {min} and {max}")]
    InvalidLimit { limit: u32, min: u32, max: u32 },

    #[error("cursor issued for stream '{found}' cannot be used with stream '{expected}'")]
    ForeignCursor { expected: String, found: String },

    #[error("log event timestamp {timestamp_ms} is out of range")]
    TimestampOutOfRange { timestamp_ms: i64 },

    // Backend
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl LogReadError {
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LogReadError::InvalidTimestamp { .. }
                | LogReadError::InvalidLimit { .. }
                | LogReadError::ForeignCursor { .. }
        )
    }
}
