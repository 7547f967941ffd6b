//! Response Cache Store
//!
//! Key-value store for serialized read responses, guarded by a single mutex.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;

use crate::cache::CacheEntry;

// == Response Cache ==
/// Concurrent-safe TTL cache mapping canonical request identities to
/// serialized response payloads.
///
/// All operations hold the single internal lock for their full duration, so
/// callers never observe partial updates. Reads and writes are mutually
/// exclusive by design; the workload is read-mostly at small scale and this
/// is not a performance-optimized structure. The lock is never held across a
/// store call.
#[derive(Debug, Default)]
pub struct ResponseCache {
    /// Keyed entries; expired ones linger until their key is next looked up
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
    // == Constructor ==
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    // == Set ==
    /// Stores `value` under `key`, expiring `ttl` from now.
    ///
    /// Overwrites any prior entry for the key; with concurrent writers the
    /// last lock holder wins. Never fails.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>, ttl: Duration) {
        let entry = CacheEntry::new(value.into(), ttl);
        self.entries.lock().insert(key.into(), entry);
    }

    // == Get ==
    /// Retrieves the payload for `key` if present and unexpired.
    ///
    /// An expired-but-present entry is treated identically to an absent one;
    /// it is dropped here rather than by a background task.
    pub fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if entry.is_expired() => {
                entries.remove(key);
                None
            }
            Some(entry) => Some(entry.value.clone()),
            None => None,
        }
    }

    // == Length ==
    /// Returns the number of physically stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread::sleep;

    #[test]
    fn test_cache_set_and_get() {
        let cache = ResponseCache::new();

        cache.set("GET /v1/users", "[]", Duration::from_secs(10));
        assert_eq!(cache.get("GET /v1/users"), Some("[]".to_string()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_get_absent() {
        let cache = ResponseCache::new();
        assert_eq!(cache.get("GET /v1/users/1"), None);
    }

    #[test]
    fn test_cache_overwrite() {
        let cache = ResponseCache::new();

        cache.set("k", "v1", Duration::from_secs(10));
        cache.set("k", "v2", Duration::from_secs(10));

        assert_eq!(cache.get("k"), Some("v2".to_string()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_ttl_expiration() {
        let cache = ResponseCache::new();

        cache.set("k", "v", Duration::from_millis(40));
        assert_eq!(cache.get("k"), Some("v".to_string()));

        sleep(Duration::from_millis(60));
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn test_cache_expired_entry_purged_on_lookup() {
        let cache = ResponseCache::new();

        cache.set("k", "v", Duration::from_millis(10));
        sleep(Duration::from_millis(30));

        // Still physically present until looked up
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("k"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_overwrite_resets_ttl() {
        let cache = ResponseCache::new();

        cache.set("k", "v1", Duration::from_millis(20));
        cache.set("k", "v2", Duration::from_secs(10));
        sleep(Duration::from_millis(40));

        assert_eq!(cache.get("k"), Some("v2".to_string()));
    }

    #[test]
    fn test_cache_concurrent_access() {
        let cache = Arc::new(ResponseCache::new());
        let mut handles = Vec::new();

        for i in 0..8 {
            let cache = cache.clone();
            handles.push(std::thread::spawn(move || {
                for j in 0..50 {
                    let key = format!("key-{}", j % 10);
                    cache.set(&key, format!("value-{i}-{j}"), Duration::from_secs(10));
                    let _ = cache.get(&key);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        // Ten distinct keys were written; all must resolve to some writer's value
        for j in 0..10 {
            assert!(cache.get(&format!("key-{j}")).is_some());
        }
    }
}
