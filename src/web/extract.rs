//! Custom Axum extractors

use axum::extract::{FromRequestParts, Path};
use axum::http::StatusCode;
use axum::http::request::Parts;

/// Task id taken from the `{id}` path segment.
///
/// Only plain decimal digits are accepted. Anything else is answered with a
/// bare 404, as if the route did not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskId(pub i64);

impl<S> FromRequestParts<S> for TaskId
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| StatusCode::NOT_FOUND)?;

        parse_task_id(&raw).map(Self).ok_or(StatusCode::NOT_FOUND)
    }
}

/// Parse a path segment as a non-negative integer id.
pub fn parse_task_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
