//! API Module
//!
//! HTTP handlers and routing for the users REST API.
//!
//! # Endpoints
//! - `GET /v1/users` - List all users
//! - `POST /v1/users` - Create a user
//! - `GET /v1/users/:id` - Get a user by id
//! - `PUT /v1/users/:id` - Update a user
//! - `DELETE /v1/users/:id` - Delete a user
//! - `GET /health` - Health check (pings the store)

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
