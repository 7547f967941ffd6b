//! Admission Interceptor
//!
//! Applies token-bucket admission control before a request reaches the rest
//! of the pipeline.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::dispatch::{Dispatch, DispatchReply, DispatchRequest, DispatchUnit};
use crate::error::{ApiError, Result};
use crate::limiter::RateLimiter;
use crate::middleware::Interceptor;

// == Admission Control ==
/// Installs the rate limiter in front of a dispatch unit.
pub struct AdmissionControl {
    limiter: Arc<RateLimiter>,
}

impl AdmissionControl {
    /// Creates the interceptor around a shared limiter.
    pub fn new(limiter: Arc<RateLimiter>) -> Self {
        Self { limiter }
    }
}

impl Interceptor for AdmissionControl {
    fn wrap(&self, inner: DispatchUnit) -> DispatchUnit {
        Arc::new(AdmissionGate {
            limiter: self.limiter.clone(),
            inner,
        })
    }
}

/// The wrapped unit: check the bucket, then delegate or short-circuit.
struct AdmissionGate {
    limiter: Arc<RateLimiter>,
    inner: DispatchUnit,
}

#[async_trait]
impl Dispatch for AdmissionGate {
    async fn call(&self, req: DispatchRequest) -> Result<DispatchReply> {
        if !self.limiter.allow() {
            debug!(key = %req.cache_key, "admission rejected");
            return Err(ApiError::RateLimited);
        }
        self.inner.call(req).await
    }
}
