use thiserror::Error;

/// Faults reported by the run metadata source or the log source.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    #[error("resource not found: {resource}")]
    NotFound { resource: String },

    #[error("access denied: {message}")]
    Unauthorized { message: String },

    #[error("request throttled: {message}")]
    Throttled { message: String },

    #[error("service unavailable: {message}")]
    Unavailable { message: String },

    #[error("{code}: {message}")]
    Service { code: String, message: String },
}

impl BackendError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn service(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Service {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, BackendError::NotFound { .. })
    }
}
