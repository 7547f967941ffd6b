//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
/// Configuration is read once at process start; there is no hot reload.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Backing store connection URL
    pub database_url: String,
    /// Maximum store connection attempts before startup fails
    pub connect_attempts: u32,
    /// Fixed delay between connection attempts, in seconds
    pub connect_retry_secs: u64,
    /// Whether the cache-read interceptor is installed
    pub cache_enabled: bool,
    /// Whether the admission interceptor is installed
    pub rate_limit_enabled: bool,
    /// TTL in seconds for cached read responses
    pub cache_ttl_secs: u64,
    /// Token bucket capacity (maximum burst)
    pub rate_limit_capacity: u32,
    /// Token refill rate per second
    pub rate_limit_per_sec: f64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `API_PORT` - HTTP server port (default: 3000)
    /// - `DATABASE_URL` - store connection URL (default: `sqlite://users.db?mode=rwc`)
    /// - `DB_CONNECT_ATTEMPTS` - connection attempts before giving up (default: 5)
    /// - `DB_CONNECT_RETRY_SECS` - delay between attempts (default: 2)
    /// - `ENABLE_CACHE` - install the cache-read interceptor (default: false)
    /// - `ENABLE_RATE_LIMITING` - install the admission interceptor (default: false)
    /// - `CACHE_TTL_SECS` - cached response TTL (default: 10)
    /// - `RATE_LIMIT_CAPACITY` - token bucket capacity (default: 3)
    /// - `RATE_LIMIT_PER_SEC` - token refill rate (default: 1.0)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://users.db?mode=rwc".to_string()),
            connect_attempts: env::var("DB_CONNECT_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            connect_retry_secs: env::var("DB_CONNECT_RETRY_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2),
            cache_enabled: env::var("ENABLE_CACHE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            rate_limit_enabled: env::var("ENABLE_RATE_LIMITING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            cache_ttl_secs: env::var("CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            rate_limit_capacity: env::var("RATE_LIMIT_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            rate_limit_per_sec: env::var("RATE_LIMIT_PER_SEC")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1.0),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            database_url: "sqlite://users.db?mode=rwc".to_string(),
            connect_attempts: 5,
            connect_retry_secs: 2,
            cache_enabled: false,
            rate_limit_enabled: false,
            cache_ttl_secs: 10,
            rate_limit_capacity: 3,
            rate_limit_per_sec: 1.0,
        }
    }
}
