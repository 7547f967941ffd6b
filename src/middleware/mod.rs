//! Middleware Module
//!
//! Ordered composition of cross-cutting behavior around the dispatch core.
//!
//! An [`Interceptor`] takes a dispatch unit and returns a new dispatch unit of
//! the same shape. The pipeline is assembled once at startup from the
//! configuration toggles and invoked per request in the configured order: the
//! first interceptor runs first on the way in and last on the way out.
//!
//! Reference ordering: admission outermost, cache inside. A cache hit
//! therefore still spends a rate-limit token, and a rejected request never
//! touches the cache.

mod admission;
mod cache_read;

pub use admission::AdmissionControl;
pub use cache_read::CacheRead;

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::cache::ResponseCache;
use crate::config::Config;
use crate::dispatch::DispatchUnit;
use crate::limiter::RateLimiter;

// == Interceptor Capability ==
/// Wraps a dispatch unit with additional behavior, preserving its shape.
pub trait Interceptor: Send + Sync {
    /// Returns a dispatch unit that runs this interceptor around `inner`.
    fn wrap(&self, inner: DispatchUnit) -> DispatchUnit;
}

// == Assembly ==
/// Composes interceptors around `innermost`, first interceptor outermost.
pub fn assemble(interceptors: Vec<Box<dyn Interceptor>>, innermost: DispatchUnit) -> DispatchUnit {
    interceptors
        .into_iter()
        .rev()
        .fold(innermost, |inner, interceptor| interceptor.wrap(inner))
}

/// Builds the pipeline the configuration asks for.
///
/// Both interceptors are optional; with both toggles off, requests go
/// straight to `dispatch`.
pub fn build_pipeline(config: &Config, dispatch: DispatchUnit) -> DispatchUnit {
    let mut interceptors: Vec<Box<dyn Interceptor>> = Vec::new();

    if config.rate_limit_enabled {
        info!(
            capacity = config.rate_limit_capacity,
            per_sec = config.rate_limit_per_sec,
            "rate limiting enabled"
        );
        let limiter = Arc::new(RateLimiter::new(
            config.rate_limit_capacity,
            config.rate_limit_per_sec,
        ));
        interceptors.push(Box::new(AdmissionControl::new(limiter)));
    }

    if config.cache_enabled {
        info!(ttl_secs = config.cache_ttl_secs, "response caching enabled");
        let cache = Arc::new(ResponseCache::new());
        interceptors.push(Box::new(CacheRead::new(
            cache,
            Duration::from_secs(config.cache_ttl_secs),
        )));
    }

    assemble(interceptors, dispatch)
}

// == Test Support ==
#[cfg(test)]
pub(crate) mod testing {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::dispatch::{Dispatch, DispatchReply, DispatchRequest};
    use crate::error::Result;

    /// Stand-in dispatch unit that counts invocations and returns a fixed body.
    #[derive(Default)]
    pub struct CountingDispatch {
        pub calls: AtomicUsize,
        pub body: String,
        pub cacheable: bool,
    }

    impl CountingDispatch {
        pub fn returning(body: &str, cacheable: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                body: body.to_string(),
                cacheable,
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Dispatch for CountingDispatch {
        async fn call(&self, _req: DispatchRequest) -> Result<DispatchReply> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(DispatchReply {
                body: Some(self.body.clone()),
                cacheable: self.cacheable,
            })
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::testing::CountingDispatch;
    use super::*;
    use crate::dispatch::{DispatchRequest, Operation};
    use crate::error::ApiError;

    fn read_request(key: &str) -> DispatchRequest {
        DispatchRequest {
            cache_key: key.to_string(),
            op: Operation::List,
        }
    }

    #[tokio::test]
    async fn test_empty_pipeline_is_passthrough() {
        let inner = Arc::new(CountingDispatch::returning("[]", true));
        let pipeline = assemble(Vec::new(), inner.clone());

        let reply = pipeline.call(read_request("GET /v1/users")).await.unwrap();
        assert_eq!(reply.body.as_deref(), Some("[]"));
        assert_eq!(inner.call_count(), 1);
    }

    #[tokio::test]
    async fn test_admission_outermost_shields_cache() {
        // Capacity 1 and no refill: the second request must be rejected
        // before the cache interceptor can serve it from a hot entry.
        let limiter = Arc::new(RateLimiter::new(1, 0.0));
        let cache = Arc::new(ResponseCache::new());
        let inner = Arc::new(CountingDispatch::returning("[]", true));

        let interceptors: Vec<Box<dyn Interceptor>> = vec![
            Box::new(AdmissionControl::new(limiter)),
            Box::new(CacheRead::new(cache, Duration::from_secs(60))),
        ];
        let pipeline = assemble(interceptors, inner.clone());

        assert!(pipeline.call(read_request("GET /v1/users")).await.is_ok());

        let rejected = pipeline.call(read_request("GET /v1/users")).await;
        assert!(matches!(rejected, Err(ApiError::RateLimited)));
        assert_eq!(inner.call_count(), 1);
    }

    #[tokio::test]
    async fn test_build_pipeline_with_toggles_off() {
        let config = Config::default();
        let inner = Arc::new(CountingDispatch::returning("[]", true));
        let pipeline = build_pipeline(&config, inner.clone());

        // Straight through to dispatch, no admission or caching in the way
        for _ in 0..10 {
            assert!(pipeline.call(read_request("GET /v1/users")).await.is_ok());
        }
        assert_eq!(inner.call_count(), 10);
    }

    #[tokio::test]
    async fn test_build_pipeline_with_both_toggles() {
        let config = Config {
            rate_limit_enabled: true,
            rate_limit_capacity: 2,
            rate_limit_per_sec: 0.0,
            cache_enabled: true,
            cache_ttl_secs: 60,
            ..Config::default()
        };
        let inner = Arc::new(CountingDispatch::returning("[]", true));
        let pipeline = build_pipeline(&config, inner.clone());

        // First request populates the cache, second is a hit; both spend a token
        assert!(pipeline.call(read_request("GET /v1/users")).await.is_ok());
        assert!(pipeline.call(read_request("GET /v1/users")).await.is_ok());
        assert_eq!(inner.call_count(), 1);

        // Bucket exhausted: rejected without reaching cache or dispatch
        let rejected = pipeline.call(read_request("GET /v1/users")).await;
        assert!(matches!(rejected, Err(ApiError::RateLimited)));
        assert_eq!(inner.call_count(), 1);
    }
}
