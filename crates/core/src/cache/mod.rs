//! Bounded in-memory cache stores with TTL expiry.
//!
//! Each store is an LRU map with a fixed item ceiling and a per-entry
//! time-to-live measured from insertion. Expiry is fixed-from-write: reads
//! promote recency for eviction purposes but never extend an entry's
//! lifetime. An evicted or expired key behaves as if it was never written.

use lru::LruCache;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Size and expiry settings for one cache store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of entries before LRU eviction (default: 1000).
    #[serde(default = "default_max")]
    pub max: usize,

    /// Entry time-to-live in milliseconds, measured from insertion
    /// (default: 24 hours).
    #[serde(default = "default_ttl_ms")]
    pub ttl_ms: u64,
}

fn default_max() -> usize {
    1000
}

fn default_ttl_ms() -> u64 {
    24 * 60 * 60 * 1000
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { max: default_max(), ttl_ms: default_ttl_ms() }
    }
}

impl CacheConfig {
    /// TTL as a Duration.
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }
}

struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

impl<V> Entry<V> {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.inserted_at.elapsed() > ttl
    }
}

/// A bounded key/value store with LRU eviction and fixed-from-write expiry.
///
/// Every store carries its own mutex; the lock is only ever taken between
/// suspension points and is never held across an await.
pub struct TtlCache<V> {
    entries: Mutex<LruCache<String, Entry<V>>>,
    ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    /// Create a store with the given capacity and expiry settings.
    pub fn new(config: CacheConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max.max(1)).expect("capacity must be at least 1");

        Self { entries: Mutex::new(LruCache::new(capacity)), ttl: config.ttl() }
    }

    /// Look up a key, dropping the entry if its TTL has elapsed.
    pub fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.entries.lock().unwrap();

        if let Some(entry) = entries.get(key) {
            if !entry.is_expired(self.ttl) {
                return Some(entry.value.clone());
            }
            entries.pop(key);
        }

        None
    }

    /// Whether a live entry exists for the key. Does not touch recency.
    pub fn contains_key(&self, key: &str) -> bool {
        let entries = self.entries.lock().unwrap();
        entries.peek(key).is_some_and(|entry| !entry.is_expired(self.ttl))
    }

    /// Insert a value, evicting the least recently used entry at capacity.
    /// A single atomic set: the new value is visible to the next lookup.
    pub fn put(&self, key: String, value: V) {
        let mut entries = self.entries.lock().unwrap();
        entries.put(key, Entry { value, inserted_at: Instant::now() });
    }

    /// Number of stored entries, counting expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Whether the store holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(max: usize, ttl_ms: u64) -> CacheConfig {
        CacheConfig { max, ttl_ms }
    }

    #[test]
    fn test_cache_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.max, 1000);
        assert_eq!(config.ttl_ms, 24 * 60 * 60 * 1000);
        assert_eq!(config.ttl(), Duration::from_secs(24 * 60 * 60));
    }

    #[test]
    fn test_put_and_get() {
        let cache = TtlCache::new(config(10, 60_000));
        cache.put("Berlin".to_string(), 1u32);

        assert_eq!(cache.get("Berlin"), Some(1));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_get_miss() {
        let cache: TtlCache<u32> = TtlCache::new(config(10, 60_000));
        assert_eq!(cache.get("absent"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_lru_eviction_order() {
        let cache = TtlCache::new(config(2, 60_000));
        cache.put("a".to_string(), 1u32);
        cache.put("b".to_string(), 2);
        cache.put("c".to_string(), 3);

        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), Some(2));
        assert_eq!(cache.get("c"), Some(3));
    }

    #[test]
    fn test_get_promotes_recency() {
        let cache = TtlCache::new(config(2, 60_000));
        cache.put("a".to_string(), 1u32);
        cache.put("b".to_string(), 2);

        let _ = cache.get("a");
        cache.put("c".to_string(), 3);

        assert_eq!(cache.get("a"), Some(1));
        assert_eq!(cache.get("b"), None);
    }

    #[test]
    fn test_contains_key_does_not_promote() {
        let cache = TtlCache::new(config(2, 60_000));
        cache.put("a".to_string(), 1u32);
        cache.put("b".to_string(), 2);

        assert!(cache.contains_key("a"));
        cache.put("c".to_string(), 3);

        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), Some(2));
    }

    #[test]
    fn test_expired_entry_misses() {
        let cache = TtlCache::new(config(10, 10));
        cache.put("a".to_string(), 1u32);

        std::thread::sleep(Duration::from_millis(30));

        assert_eq!(cache.get("a"), None);
        assert!(!cache.contains_key("a"));
    }

    #[test]
    fn test_read_does_not_refresh_ttl() {
        let cache = TtlCache::new(config(10, 200));
        cache.put("a".to_string(), 1u32);

        std::thread::sleep(Duration::from_millis(50));
        assert_eq!(cache.get("a"), Some(1));

        std::thread::sleep(Duration::from_millis(200));
        assert_eq!(cache.get("a"), None);
    }

    #[test]
    fn test_overwrite_restarts_ttl() {
        let cache = TtlCache::new(config(10, 200));
        cache.put("a".to_string(), 1u32);

        std::thread::sleep(Duration::from_millis(150));
        cache.put("a".to_string(), 2);

        std::thread::sleep(Duration::from_millis(100));
        assert_eq!(cache.get("a"), Some(2));
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let cache = TtlCache::new(config(0, 60_000));
        cache.put("a".to_string(), 1u32);
        assert_eq!(cache.get("a"), Some(1));
    }
}
