//! Cache Module
//!
//! Provides an in-memory response cache with TTL expiration.
//!
//! Entries are evicted lazily: an expired entry is logically absent the moment
//! its deadline passes and is physically dropped on the next lookup of its
//! key. There is no background sweeper and no size cap; memory use is bounded
//! by the number of distinct request identities.

mod entry;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use store::ResponseCache;
