//! Error types.
//!
//! Two worlds, kept apart:
//!
//! - [`Error`] — infrastructure failures: binding the listen socket or
//!   accepting a connection. These terminate `main`, never a request.
//! - [`ApiError`] — what a request handler can produce. Each variant maps to
//!   exactly one response shape; none is fatal to the process, none is
//!   retried, and the store is untouched whenever one is raised.

use http::StatusCode;
use serde::Serialize;
use thiserror::Error;

use crate::response::{IntoResponse, Json, Response};

/// The error type returned by roster's fallible infrastructure operations.
#[derive(Debug, Error)]
#[error("io: {0}")]
pub struct Error(#[from] std::io::Error);

// ── API error taxonomy ────────────────────────────────────────────────────────

/// One failed field check, as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

/// A client error detected while handling a request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The referenced id is not in the store. The display string is the wire
    /// message.
    #[error("User with id {0} not found")]
    NotFound(u64),

    /// Input failed one or more declared field constraints. Carries every
    /// violation found in the request, not just the first.
    #[error("validation failed")]
    Validation(Vec<Violation>),
}

impl ApiError {
    /// Shorthand for a single-field validation failure.
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation(vec![Violation { field, message: message.into() }])
    }
}

/// Maps each variant to its response: `404 {"detail": "..."}` for a missing
/// id, `422 {"detail": [{field, message}, ...]}` for validation failures.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiError::NotFound(_) => {
                (StatusCode::NOT_FOUND, serde_json::json!(self.to_string()))
            }
            ApiError::Validation(violations) => {
                (StatusCode::UNPROCESSABLE_ENTITY, serde_json::json!(violations))
            }
        };
        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}
