//! API Routes
//!
//! Configures the Axum router with all endpoints.

use axum::{
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_user, delete_user, get_user, health_handler, list_users, update_user, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /v1/users` - List all users
/// - `POST /v1/users` - Create a user
/// - `GET /v1/users/:id` - Get a user by id
/// - `PUT /v1/users/:id` - Update a user
/// - `DELETE /v1/users/:id` - Delete a user
/// - `GET /health` - Health check
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
///
/// The cache and admission interceptors are not router layers; they live in
/// the dispatch pipeline carried by [`AppState`].
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/v1/users", get(list_users).post(create_user))
        .route(
            "/v1/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
