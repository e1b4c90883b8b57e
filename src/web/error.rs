//! HTTP error types.
//!
//! `WebError` renders as plain text for the HTML pages. `ApiError` wraps it
//! and renders the same status as a JSON `{code, message}` body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use crate::error::{ErrorCode, StoreError};

/// Body returned by the index page when the database cannot be reached.
pub const UNAVAILABLE_MESSAGE: &str = "Error connecting to the database.";

#[derive(Debug)]
pub enum WebError {
    /// Storage failed or was unreachable.
    Store(StoreError),

    /// No task with this id (JSON API only).
    NotFound { id: i64 },

    /// Malformed request (400).
    BadRequest(String),

    /// Blocking task panicked or was cancelled (500).
    Internal(String),
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            WebError::Store(e) if e.is_unavailable() => StatusCode::SERVICE_UNAVAILABLE,
            WebError::Store(_) | WebError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            WebError::NotFound { .. } => StatusCode::NOT_FOUND,
            WebError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            WebError::Store(e) => e.code(),
            WebError::NotFound { .. } => ErrorCode::TaskNotFound,
            WebError::BadRequest(_) => ErrorCode::InvalidRequest,
            WebError::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Client-facing message. Storage and internal details are not returned.
    fn public_message(&self) -> String {
        match self {
            WebError::Store(e) if e.is_unavailable() => UNAVAILABLE_MESSAGE.to_string(),
            WebError::Store(_) | WebError::Internal(_) => "an internal error occurred".to_string(),
            WebError::NotFound { id } => format!("Task not found: {}", id),
            WebError::BadRequest(message) => message.clone(),
        }
    }

    /// Log the details that `public_message` withholds.
    fn log(&self) {
        match self {
            WebError::Store(e) if !e.is_unavailable() => error!(error = %e, "Storage error"),
            WebError::Internal(message) => error!("Internal error: {}", message),
            _ => {}
        }
    }
}

impl From<StoreError> for WebError {
    fn from(err: StoreError) -> Self {
        WebError::Store(err)
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        self.log();
        (self.status(), self.public_message()).into_response()
    }
}

/// JSON rendering of [`WebError`] for `/api` routes.
#[derive(Debug)]
pub struct ApiError(pub WebError);

impl From<WebError> for ApiError {
    fn from(err: WebError) -> Self {
        ApiError(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError(WebError::Store(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.0.log();
        let body = json!({
            "code": self.0.code(),
            "message": self.0.public_message(),
        });
        (self.0.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn unavailable() -> StoreError {
        StoreError::Unavailable {
            path: PathBuf::from("/missing/todo.db"),
            source: rusqlite::Error::InvalidQuery,
        }
    }

    #[test]
    fn unavailable_maps_to_503() {
        let err = WebError::from(unavailable());
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.public_message(), UNAVAILABLE_MESSAGE);
    }

    #[test]
    fn storage_failure_hides_details() {
        let err = WebError::from(StoreError::Storage(rusqlite::Error::InvalidQuery));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "an internal error occurred");
    }

    #[test]
    fn not_found_has_task_code() {
        let err = WebError::NotFound { id: 7 };
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.code(), ErrorCode::TaskNotFound);
    }

    #[test]
    fn storage_failure_response_is_generic() {
        let err = WebError::from(StoreError::Storage(rusqlite::Error::InvalidQuery));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
