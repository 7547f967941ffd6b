//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cached response payload with its expiry deadline.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload
    pub value: String,
    /// Absolute deadline after which the entry is logically absent
    pub expires_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl` from now.
    pub fn new(value: String, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired once the current time reaches
    /// the deadline, so a reader only ever observes entries with
    /// `now < expires_at`.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}
