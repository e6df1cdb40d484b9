use std::io;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NotFound,
    Validation,
    InvalidStatus,
    StorageError,
    SerializationError,
    ConfigError,
    Message,
}

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("invalid detailed status: {value}")]
    InvalidStatus { value: String },

    #[error("storage error during {operation}: {details}")]
    StorageError { operation: String, details: String },

    #[error("{format} serialization error: {details}")]
    SerializationError { format: String, details: String },

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, TrackerError>;

impl TrackerError {
    pub fn code(&self) -> ErrorCode {
        match self {
            TrackerError::NotFound(_) => ErrorCode::NotFound,
            TrackerError::Validation(_) => ErrorCode::Validation,
            TrackerError::InvalidStatus { .. } => ErrorCode::InvalidStatus,
            TrackerError::StorageError { .. } => ErrorCode::StorageError,
            TrackerError::SerializationError { .. } => ErrorCode::SerializationError,
            TrackerError::ConfigError(_) => ErrorCode::ConfigError,
            TrackerError::Message(_) => ErrorCode::Message,
        }
    }

    pub fn not_found(entity: impl Into<String>) -> Self {
        TrackerError::NotFound(entity.into())
    }

    pub fn validation(details: impl Into<String>) -> Self {
        TrackerError::Validation(details.into())
    }

    pub fn invalid_status(value: impl Into<String>) -> Self {
        TrackerError::InvalidStatus { value: value.into() }
    }
}

#[macro_export]
macro_rules! storage_err {
    ($op:expr, $err:expr) => {
        $crate::foundation::TrackerError::StorageError { operation: $op.into(), details: $err.to_string() }
    };
}

impl From<io::Error> for TrackerError {
    fn from(err: io::Error) -> Self {
        TrackerError::StorageError { operation: "io".to_string(), details: err.to_string() }
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        TrackerError::SerializationError { format: "json".to_string(), details: err.to_string() }
    }
}

// NOTE: Avoid adding generic "stringly" error conversions here.
// Use structured `TrackerError` variants at the call site to preserve context.
