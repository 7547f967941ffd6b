//! Rate Limiter Module
//!
//! Token-bucket admission control for inbound requests.

mod bucket;

pub use bucket::RateLimiter;
