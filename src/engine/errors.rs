use chrono::{DateTime, Utc};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

/// Malformed caller input or configuration. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing key field: {field}")]
    MissingKeyField { field: String },

    #[error("Unknown key field in filter: {field}")]
    UnknownKeyField { field: String },

    #[error("Field '{field}' has the wrong type: expected {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    #[error("Invalid time range: start {start} is after end {end}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("At least one key field must be configured")]
    EmptyKeyFields,

    #[error("Window size must be positive, got {0}")]
    InvalidWindowSize(usize),

    #[error("Invalid field path: '{0}'")]
    InvalidFieldPath(String),

    #[error("Output name '{0}' is configured more than once")]
    DuplicateOutput(String),

    #[error("Unknown timezone: {0}")]
    InvalidTimezone(String),
}

/// Failures reported by, or while talking to, the storage collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("Storage call timed out after {0:?}")]
    Timeout(Duration),

    #[error("Bucket update conflicted {attempts} times; giving up")]
    Conflict { attempts: u32 },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RollupError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Storage failed: {0}")]
    Storage(#[from] StorageError),
}

impl RollupError {
    pub fn is_validation(&self) -> bool {
        matches!(self, RollupError::Validation(_))
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, RollupError::Storage(_))
    }

    pub fn log_error(&self) {
        match self {
            RollupError::Validation(e) => {
                error!("Rejected input: {}", e);
                debug!("Validation error details: {:?}", e);
            }
            RollupError::Storage(e) => {
                error!("Storage call failed: {}", e);
                debug!("Storage error details: {:?}", e);
            }
        }
    }
}
