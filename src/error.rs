//! Structured error types for storage operations.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Not found errors
    TaskNotFound,

    // Request errors
    InvalidRequest,

    // Storage errors
    StorageUnavailable,
    StorageFailure,

    // Internal errors
    InternalError,
}

/// Errors raised by the storage gateway.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No connection could be opened to the database.
    #[error("database unavailable at {}: {source}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// A statement failed after the connection was established.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl StoreError {
    pub fn code(&self) -> ErrorCode {
        match self {
            StoreError::Unavailable { .. } => ErrorCode::StorageUnavailable,
            StoreError::Storage(_) => ErrorCode::StorageFailure,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable { .. })
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_serialize_screaming_snake_case() {
        let json = serde_json::to_string(&ErrorCode::StorageUnavailable).unwrap();
        assert_eq!(json, "\"STORAGE_UNAVAILABLE\"");
        let json = serde_json::to_string(&ErrorCode::TaskNotFound).unwrap();
        assert_eq!(json, "\"TASK_NOT_FOUND\"");
    }

    #[test]
    fn storage_error_maps_to_failure_code() {
        let err = StoreError::from(rusqlite::Error::InvalidQuery);
        assert_eq!(err.code(), ErrorCode::StorageFailure);
        assert!(!err.is_unavailable());
    }

    #[test]
    fn unavailable_error_mentions_path() {
        let err = StoreError::Unavailable {
            path: PathBuf::from("/missing/todo.db"),
            source: rusqlite::Error::InvalidQuery,
        };
        assert_eq!(err.code(), ErrorCode::StorageUnavailable);
        assert!(err.to_string().contains("/missing/todo.db"));
    }
}
