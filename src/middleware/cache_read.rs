//! Cache-Read Interceptor
//!
//! Serves read-shaped requests from the TTL cache and populates it from
//! cacheable results. Write-shaped requests pass through untouched.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::cache::ResponseCache;
use crate::dispatch::{Dispatch, DispatchReply, DispatchRequest, DispatchUnit};
use crate::error::Result;
use crate::middleware::Interceptor;

// == Cache Read ==
/// Installs the response cache in front of a dispatch unit.
pub struct CacheRead {
    cache: Arc<ResponseCache>,
    /// Fixed TTL applied to every stored entry
    ttl: Duration,
}

impl CacheRead {
    /// Creates the interceptor around a shared cache with a fixed TTL.
    pub fn new(cache: Arc<ResponseCache>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }
}

impl Interceptor for CacheRead {
    fn wrap(&self, inner: DispatchUnit) -> DispatchUnit {
        Arc::new(CacheGate {
            cache: self.cache.clone(),
            ttl: self.ttl,
            inner,
        })
    }
}

/// The wrapped unit: hit short-circuits, miss populates.
struct CacheGate {
    cache: Arc<ResponseCache>,
    ttl: Duration,
    inner: DispatchUnit,
}

#[async_trait]
impl Dispatch for CacheGate {
    async fn call(&self, req: DispatchRequest) -> Result<DispatchReply> {
        if !req.op.is_read() {
            return self.inner.call(req).await;
        }

        if let Some(body) = self.cache.get(&req.cache_key) {
            debug!(key = %req.cache_key, "cache hit");
            return Ok(DispatchReply::cached(body));
        }

        // The lock is released before this call; a slow store query never
        // stalls cache reads for unrelated requests
        let key = req.cache_key.clone();
        let reply = self.inner.call(req).await?;

        if reply.cacheable {
            if let Some(body) = &reply.body {
                self.cache.set(key, body.clone(), self.ttl);
            }
        }
        Ok(reply)
    }
}
