//! Dispatch Module
//!
//! The dispatch-unit capability that interceptors wrap, the request and reply
//! types that flow through the pipeline, and the CRUD dispatcher itself.

mod crud;

pub use crud::CrudDispatch;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::{ApiError, Result};
use crate::models::UserPayload;

// == Operation ==
/// The five CRUD operations, carrying their raw inputs.
///
/// Identifiers arrive unparsed; turning them into integers is the
/// dispatcher's job, so a malformed id is a client error rather than a
/// routing concern.
#[derive(Debug, Clone)]
pub enum Operation {
    /// Query all users
    List,
    /// Insert a new user (store assigns the identity)
    Create { payload: UserPayload },
    /// Query a single user by raw id
    Get { id: String },
    /// Replace a user's fields by raw id
    Update { id: String, payload: UserPayload },
    /// Delete a user by raw id
    Delete { id: String },
}

impl Operation {
    /// Read-shaped operations are the only ones the cache interceptor touches.
    pub fn is_read(&self) -> bool {
        matches!(self, Operation::List | Operation::Get { .. })
    }
}

// == Dispatch Request ==
/// One request flowing through the pipeline.
#[derive(Debug, Clone)]
pub struct DispatchRequest {
    /// Canonical request identity: `METHOD path?query`, case-sensitive,
    /// no normalization. Used verbatim as the cache key.
    pub cache_key: String,
    /// The operation to perform
    pub op: Operation,
}

// == Dispatch Reply ==
/// Successful outcome of a dispatch: an optional serialized payload and
/// whether a cache interceptor may store it.
#[derive(Debug, Clone)]
pub struct DispatchReply {
    /// Serialized JSON payload; None means no body (204)
    pub body: Option<String>,
    /// True when a read produced this payload fresh from the store
    pub cacheable: bool,
}

impl DispatchReply {
    /// Serializes `value` into a reply.
    pub fn json<T: Serialize>(value: &T, cacheable: bool) -> Result<Self> {
        let body = serde_json::to_string(value)
            .map_err(|err| ApiError::Internal(format!("response serialization failed: {err}")))?;
        Ok(Self {
            body: Some(body),
            cacheable,
        })
    }

    /// A bodyless reply.
    pub fn no_content() -> Self {
        Self {
            body: None,
            cacheable: false,
        }
    }

    /// A reply served verbatim from the cache. Never re-cached.
    pub fn cached(body: String) -> Self {
        Self {
            body: Some(body),
            cacheable: false,
        }
    }
}

impl IntoResponse for DispatchReply {
    fn into_response(self) -> Response {
        match self.body {
            Some(body) => (
                [(header::CONTENT_TYPE, "application/json")],
                body,
            )
                .into_response(),
            None => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

// == Dispatch Capability ==
/// A unit of request dispatch.
///
/// Interceptors and the CRUD dispatcher all implement this one-method
/// capability, which is what lets cross-cutting behavior wrap business logic
/// without either knowing about the other.
#[async_trait]
pub trait Dispatch: Send + Sync {
    /// Performs the operation, or reports a caller-visible error.
    async fn call(&self, req: DispatchRequest) -> Result<DispatchReply>;
}

/// Shared handle to a dispatch unit; cloning is cheap.
pub type DispatchUnit = Arc<dyn Dispatch>;
