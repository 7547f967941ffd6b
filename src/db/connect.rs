//! Connection Establishment
//!
//! Bounded-retry acquisition of the backing store handle. Used once at
//! process startup; failure after the retry budget is fatal, there is no
//! degraded-without-store mode.

use std::future::Future;
use std::time::Duration;

use tracing::{info, warn};

use crate::db::Database;
use crate::error::ConnectError;

// == Establish ==
/// Runs `probe` up to `max_attempts` times, waiting exactly `delay` between
/// attempts (fixed, not exponential), regardless of failure cause.
///
/// Returns the first successful probe result, or a [`ConnectError`] carrying
/// the attempt count and the final cause. Every attempt emits a log line.
pub(crate) async fn establish<T, F, Fut>(
    max_attempts: u32,
    delay: Duration,
    mut probe: F,
) -> Result<T, ConnectError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match probe().await {
            Ok(value) => {
                info!(attempt, "connected to the backing store");
                return Ok(value);
            }
            Err(source) if attempt >= max_attempts => {
                return Err(ConnectError { attempts: attempt, source });
            }
            Err(err) => {
                warn!(
                    attempt,
                    max_attempts,
                    error = %err,
                    "store connection failed, retrying in {:?}",
                    delay
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

// == Connect With Retry ==
/// Opens the process-wide store handle.
///
/// Each attempt opens a SQLite pool, runs a liveness query, and applies the
/// schema migration, so a handle returned from here is ready to serve.
pub async fn connect_with_retry(
    url: &str,
    max_attempts: u32,
    delay: Duration,
) -> Result<Database, ConnectError> {
    establish(max_attempts, delay, || Database::open(url)).await
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Instant;

    #[tokio::test]
    async fn test_establish_succeeds_first_attempt() {
        let calls = AtomicU32::new(0);
        let result = establish(5, Duration::from_millis(50), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, sqlx::Error>(42) }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_establish_retries_until_success() {
        let calls = AtomicU32::new(0);
        let result = establish(5, Duration::from_millis(5), || {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if n < 3 {
                    Err(sqlx::Error::PoolClosed)
                } else {
                    Ok("handle")
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "handle");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_establish_bounded_attempts() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = establish(5, Duration::from_millis(5), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(sqlx::Error::PoolClosed) }
        })
        .await;

        let err = result.unwrap_err();
        assert_eq!(err.attempts, 5);
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_establish_attempts_spaced_by_delay() {
        let delay = Duration::from_millis(20);
        let started = Instant::now();
        let result: Result<(), _> = establish(3, delay, || async { Err(sqlx::Error::PoolClosed) }).await;

        assert_eq!(result.unwrap_err().attempts, 3);
        // Two waits between three attempts; none after the final failure
        assert!(started.elapsed() >= delay * 2);
    }

    #[tokio::test]
    async fn test_connect_with_retry_bad_url_is_fatal() {
        let result = connect_with_retry(
            "sqlite:///nonexistent-dir/users.db",
            2,
            Duration::from_millis(5),
        )
        .await;

        assert_eq!(result.unwrap_err().attempts, 2);
    }
}
