//! Error types for the users API
//!
//! Provides unified error handling using thiserror.
//!
//! Request-level errors are converted to a caller-visible status and never
//! crash the process; only the startup connection failure is fatal.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == API Error Enum ==
/// Unified per-request error type.
///
/// Each variant maps to a distinct, stable HTTP status so callers can
/// discriminate "fix your request" from "nothing here" from "try again later".
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed identifier or request body
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Well-formed request, entity absent
    #[error("Not found: {0}")]
    NotFound(String),

    /// Admission rejected by the rate limiter
    #[error("Too many requests")]
    RateLimited,

    /// Backing store failed mid-request
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many requests".to_string(),
            ),
            ApiError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        // Server-side failures are logged; client errors are not
        if status.is_server_error() {
            tracing::error!(%status, "request failed: {}", message);
        }

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Store Error ==
/// Opaque failure from the backing store.
///
/// The core interprets no error codes beyond "no rows" vs "other"; absence is
/// expressed through `Option`/`bool` on the store capability, so any error
/// reaching this type is a server-side failure.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Underlying driver failure
    #[error("backing store failure: {0}")]
    Backend(#[from] sqlx::Error),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        // Writes are never retried here: retry-on-write risks duplicate effects
        ApiError::Unavailable(err.to_string())
    }
}

// == Connect Error ==
/// Store unreachable after the bounded retry budget. Fatal at startup.
#[derive(Error, Debug)]
#[error("backing store unreachable after {attempts} attempt(s): {source}")]
pub struct ConnectError {
    /// Number of connection attempts performed
    pub attempts: u32,
    /// Cause of the final failed attempt
    #[source]
    pub source: sqlx::Error,
}

// == Result Type Alias ==
/// Convenience Result type for request handling.
pub type Result<T> = std::result::Result<T, ApiError>;
