//! Store Errors
//!
//! Failures of the persistence backend. None of these are fatal: loads
//! degrade to defaults and failed saves leave the previous state in place.

use thiserror::Error;

/// Common result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence-level errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Read failed for `{key}`: {reason}")]
    Read { key: String, reason: String },
    #[error("Write failed for `{key}`: {reason}")]
    Write { key: String, reason: String },
    #[error("Serialization failed: {0}")]
    Serialize(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialize(e.to_string())
    }
}
