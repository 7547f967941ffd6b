//! API Handlers
//!
//! HTTP request handlers for each endpoint. Handlers translate the HTTP
//! boundary into dispatch requests, hand them to the assembled pipeline, and
//! convert replies back into responses. Business logic lives in the pipeline,
//! not here.

use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Path, State},
    http::Uri,
    Json,
};

use crate::db::UserStore;
use crate::dispatch::{DispatchReply, DispatchRequest, DispatchUnit, Operation};
use crate::error::Result;
use crate::models::{HealthResponse, UserPayload};

/// Application state shared across all handlers.
///
/// Constructed once at startup; no ambient singletons. The pipeline carries
/// the cache and limiter internally, the store handle is kept alongside for
/// the health probe.
#[derive(Clone)]
pub struct AppState {
    /// The assembled interceptor pipeline around CRUD dispatch
    pub pipeline: DispatchUnit,
    /// The backing store handle, for liveness checks
    pub store: Arc<dyn UserStore>,
}

impl AppState {
    /// Creates a new AppState from an assembled pipeline and store handle.
    pub fn new(pipeline: DispatchUnit, store: Arc<dyn UserStore>) -> Self {
        Self { pipeline, store }
    }
}

/// Canonical request identity: `METHOD path?query`, case-sensitive, with no
/// normalization. Serves as the cache key for read-shaped requests.
fn cache_key(method: &str, uri: &Uri) -> String {
    match uri.path_and_query() {
        Some(pq) => format!("{method} {pq}"),
        None => format!("{method} {}", uri.path()),
    }
}

/// Handler for GET /v1/users
pub async fn list_users(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> Result<DispatchReply> {
    state
        .pipeline
        .call(DispatchRequest {
            cache_key: cache_key("GET", &uri),
            op: Operation::List,
        })
        .await
}

/// Handler for POST /v1/users
pub async fn create_user(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Json(payload): Json<UserPayload>,
) -> Result<DispatchReply> {
    state
        .pipeline
        .call(DispatchRequest {
            cache_key: cache_key("POST", &uri),
            op: Operation::Create { payload },
        })
        .await
}

/// Handler for GET /v1/users/:id
///
/// The identifier stays raw here; the dispatcher parses it so a malformed id
/// is reported as invalid input rather than a missing route.
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    OriginalUri(uri): OriginalUri,
) -> Result<DispatchReply> {
    state
        .pipeline
        .call(DispatchRequest {
            cache_key: cache_key("GET", &uri),
            op: Operation::Get { id },
        })
        .await
}

/// Handler for PUT /v1/users/:id
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    OriginalUri(uri): OriginalUri,
    Json(payload): Json<UserPayload>,
) -> Result<DispatchReply> {
    state
        .pipeline
        .call(DispatchRequest {
            cache_key: cache_key("PUT", &uri),
            op: Operation::Update { id, payload },
        })
        .await
}

/// Handler for DELETE /v1/users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    OriginalUri(uri): OriginalUri,
) -> Result<DispatchReply> {
    state
        .pipeline
        .call(DispatchRequest {
            cache_key: cache_key("DELETE", &uri),
            op: Operation::Delete { id },
        })
        .await
}

/// Handler for GET /health
///
/// Pings the store, so an unreachable backend surfaces as unavailable here
/// rather than on the next CRUD request.
pub async fn health_handler(State(state): State<AppState>) -> Result<Json<HealthResponse>> {
    state.store.ping().await?;
    Ok(Json(HealthResponse::healthy()))
}
