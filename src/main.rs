//! Users API - A small CRUD service with response caching and admission control
//!
//! Serves a users resource over HTTP, backed by a SQL store that may be
//! unavailable at startup. Cross-cutting behavior (response caching,
//! token-bucket admission control) is composed as an interceptor pipeline
//! around the CRUD dispatch core.

mod api;
mod cache;
mod config;
mod db;
mod dispatch;
mod error;
mod limiter;
mod middleware;
mod models;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use config::Config;
use db::UserStore;
use dispatch::CrudDispatch;
use middleware::build_pipeline;

/// Main entry point for the users API server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Establish the store connection with bounded retries (fatal on failure)
/// 4. Assemble the interceptor pipeline around CRUD dispatch
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "users_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Users API Server");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, cache={}, rate_limiting={}, connect_attempts={}",
        config.server_port, config.cache_enabled, config.rate_limit_enabled, config.connect_attempts
    );

    // Establish the process-wide store handle; there is no degraded mode
    // without the store, so exhausting the retry budget is fatal
    let database = db::connect_with_retry(
        &config.database_url,
        config.connect_attempts,
        Duration::from_secs(config.connect_retry_secs),
    )
    .await
    .context("failed to establish backing store connection")?;
    let store: Arc<dyn UserStore> = Arc::new(database);

    // Assemble the pipeline once; interceptors are fixed for the process life
    let dispatch = Arc::new(CrudDispatch::new(store.clone()));
    let pipeline = build_pipeline(&config, dispatch);
    let state = AppState::new(pipeline, store);

    // Create router with all endpoints
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
