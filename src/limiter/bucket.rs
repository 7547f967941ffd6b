//! Token Bucket
//!
//! Holds a capped count of permits that refill continuously at a fixed rate.
//! Refill is computed lazily on each admission check rather than by a timer.

use std::time::{Duration, Instant};

use parking_lot::Mutex;

// == Bucket State ==
/// Mutable limiter state, guarded by the limiter's lock.
///
/// Invariant: `0 <= tokens <= capacity`, and tokens only decrease when a
/// request is admitted.
#[derive(Debug)]
struct BucketState {
    /// Available permits; fractional between refills
    tokens: f64,
    /// When tokens were last recomputed
    last_refill: Instant,
}

// == Rate Limiter ==
/// Non-blocking token-bucket rate limiter.
///
/// A rejected caller is not queued or retried here; the admission interceptor
/// decides what a rejection means. Starts full, so the configured burst is
/// available immediately.
#[derive(Debug)]
pub struct RateLimiter {
    /// Maximum tokens the bucket can hold
    capacity: f64,
    /// Tokens added per second of elapsed time
    refill_per_sec: f64,
    /// Guarded mutable state
    state: Mutex<BucketState>,
}

impl RateLimiter {
    // == Constructor ==
    /// Creates a full bucket with the given capacity and refill rate.
    pub fn new(capacity: u32, refill_per_sec: f64) -> Self {
        Self {
            capacity: f64::from(capacity),
            refill_per_sec,
            state: Mutex::new(BucketState {
                tokens: f64::from(capacity),
                last_refill: Instant::now(),
            }),
        }
    }

    // == Allow ==
    /// Checks whether one request may be admitted right now.
    ///
    /// Refills lazily from the elapsed time since the last check, capped at
    /// capacity, then takes one token if available. Atomic with respect to
    /// the limiter's own state; concurrent callers are served in
    /// lock-acquisition order with no further fairness guarantee.
    pub fn allow(&self) -> bool {
        self.allow_at(Instant::now())
    }

    /// Admission check against an explicit clock reading.
    ///
    /// Time only moves forward here: a reading older than the last refill
    /// contributes zero elapsed time rather than draining tokens.
    fn allow_at(&self, now: Instant) -> bool {
        let mut state = self.state.lock();

        let elapsed = now.saturating_duration_since(state.last_refill);
        state.tokens = self
            .capacity
            .min(state.tokens + elapsed.as_secs_f64() * self.refill_per_sec);
        state.last_refill = now;

        if state.tokens >= 1.0 {
            state.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    // == Available ==
    /// Current token estimate, without refilling.
    #[cfg(test)]
    fn available(&self) -> f64 {
        self.state.lock().tokens
    }
}
