//! Users API - A small CRUD service with response caching and admission control
//!
//! Sits between an HTTP router and a slow, occasionally-unavailable backing
//! store. Reads can be served from a TTL cache, admission is bounded by a
//! token bucket, and both behaviors are composed as interceptors around the
//! CRUD dispatch core.

pub mod api;
pub mod cache;
pub mod config;
pub mod db;
pub mod dispatch;
pub mod error;
pub mod limiter;
pub mod middleware;
pub mod models;

pub use api::AppState;
pub use config::Config;
pub use middleware::build_pipeline;
