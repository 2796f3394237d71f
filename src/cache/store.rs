//! Namespace Cache Module
//!
//! Bounded per-namespace LRU buckets combining HashMap storage with
//! recency tracking.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::cache::{CacheStats, RecencyTracker};

// == Bucket ==
/// Cache state for a single namespace.
#[derive(Debug, Default)]
struct Bucket {
    /// Key-value storage
    entries: HashMap<String, Value>,
    /// Recency order over the stored keys
    tracker: RecencyTracker,
}

// == Namespace Cache ==
/// Per-namespace bounded LRU cache.
///
/// Buckets are created lazily by `touch_or_insert`; a lookup miss never
/// creates one. The capacity bound is enforced independently per bucket.
#[derive(Debug)]
pub struct NamespaceCache {
    /// One bucket per namespace
    buckets: HashMap<String, Bucket>,
    /// Maximum number of entries allowed per bucket
    max_entries: usize,
    /// Performance statistics, aggregated across buckets
    stats: CacheStats,
}

impl NamespaceCache {
    // == Constructor ==
    /// Creates a new NamespaceCache with the given per-namespace capacity.
    pub fn new(max_entries: usize) -> Self {
        Self {
            buckets: HashMap::new(),
            max_entries,
            stats: CacheStats::new(),
        }
    }

    // == Touch Or Insert ==
    /// Inserts or updates a key and marks it most recently used.
    ///
    /// If the insert pushes the bucket over capacity, the least recently
    /// used entry is evicted - exactly one, never more.
    pub fn touch_or_insert(&mut self, namespace: &str, key: &str, value: Value) {
        let bucket = self.buckets.entry(namespace.to_string()).or_default();

        bucket.entries.insert(key.to_string(), value);
        bucket.tracker.touch(key);

        if bucket.entries.len() > self.max_entries {
            if let Some(evicted) = bucket.tracker.evict_oldest() {
                bucket.entries.remove(&evicted);
                self.stats.record_eviction(namespace);
                debug!(namespace, key = %evicted, "evicted least recently used entry");
            }
        }
    }

    // == Lookup ==
    /// Returns the cached value for a key and marks it most recently used.
    ///
    /// A miss has no side effects: in particular it does not create the
    /// namespace's bucket.
    pub fn lookup(&mut self, namespace: &str, key: &str) -> Option<Value> {
        let hit = self
            .buckets
            .get_mut(namespace)
            .and_then(|bucket| {
                let value = bucket.entries.get(key)?.clone();
                bucket.tracker.touch(key);
                Some(value)
            });

        match hit {
            Some(value) => {
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Remove ==
    /// Removes a key from a namespace's bucket.
    ///
    /// No-op if the key is absent or the bucket does not exist yet.
    pub fn remove(&mut self, namespace: &str, key: &str) {
        if let Some(bucket) = self.buckets.get_mut(namespace) {
            bucket.entries.remove(key);
            bucket.tracker.remove(key);
        }
    }

    // == Reset ==
    /// Replaces a namespace's bucket with an empty one.
    pub fn reset(&mut self, namespace: &str) {
        self.buckets.insert(namespace.to_string(), Bucket::default());
    }

    // == Namespace Length ==
    /// Returns the number of cached entries for a namespace.
    pub fn namespace_len(&self, namespace: &str) -> usize {
        self.buckets
            .get(namespace)
            .map_or(0, |bucket| bucket.entries.len())
    }

    // == Contains ==
    /// Checks whether a key is currently cached, without touching recency.
    pub fn contains(&self, namespace: &str, key: &str) -> bool {
        self.buckets
            .get(namespace)
            .is_some_and(|bucket| bucket.entries.contains_key(key))
    }

    // == Stats ==
    /// Returns a snapshot of current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(
            self.buckets.values().map(|bucket| bucket.entries.len()).sum(),
        );
        stats
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cache_new() {
        let cache = NamespaceCache::new(100);
        assert_eq!(cache.namespace_len("ns"), 0);
    }

    #[test]
    fn test_cache_insert_and_lookup() {
        let mut cache = NamespaceCache::new(100);

        cache.touch_or_insert("ns", "key1", json!({"x": 1}));
        let value = cache.lookup("ns", "key1");

        assert_eq!(value, Some(json!({"x": 1})));
        assert_eq!(cache.namespace_len("ns"), 1);
    }

    #[test]
    fn test_cache_lookup_miss() {
        let mut cache = NamespaceCache::new(100);
        assert_eq!(cache.lookup("ns", "nonexistent"), None);
    }

    #[test]
    fn test_cache_lookup_miss_does_not_create_bucket() {
        let mut cache = NamespaceCache::new(100);

        cache.lookup("ns", "key1");

        assert!(!cache.buckets.contains_key("ns"));
    }

    #[test]
    fn test_cache_update_existing_key() {
        let mut cache = NamespaceCache::new(100);

        cache.touch_or_insert("ns", "key1", json!(1));
        cache.touch_or_insert("ns", "key1", json!(2));

        assert_eq!(cache.lookup("ns", "key1"), Some(json!(2)));
        assert_eq!(cache.namespace_len("ns"), 1);
    }

    #[test]
    fn test_cache_eviction_at_capacity() {
        let mut cache = NamespaceCache::new(2);

        cache.touch_or_insert("ns", "key1", json!(1));
        cache.touch_or_insert("ns", "key2", json!(2));
        cache.touch_or_insert("ns", "key3", json!(3));

        // key1 was least recently used
        assert_eq!(cache.namespace_len("ns"), 2);
        assert!(!cache.contains("ns", "key1"));
        assert!(cache.contains("ns", "key2"));
        assert!(cache.contains("ns", "key3"));
    }

    #[test]
    fn test_cache_lookup_refreshes_recency() {
        let mut cache = NamespaceCache::new(2);

        cache.touch_or_insert("ns", "key1", json!(1));
        cache.touch_or_insert("ns", "key2", json!(2));

        // Touch key1 so key2 becomes the eviction candidate
        cache.lookup("ns", "key1");
        cache.touch_or_insert("ns", "key3", json!(3));

        assert!(cache.contains("ns", "key1"));
        assert!(!cache.contains("ns", "key2"));
        assert!(cache.contains("ns", "key3"));
    }

    #[test]
    fn test_cache_update_does_not_evict() {
        let mut cache = NamespaceCache::new(2);

        cache.touch_or_insert("ns", "key1", json!(1));
        cache.touch_or_insert("ns", "key2", json!(2));
        // Overwrite while at capacity - no eviction should happen
        cache.touch_or_insert("ns", "key1", json!(10));

        assert_eq!(cache.namespace_len("ns"), 2);
        assert!(cache.contains("ns", "key1"));
        assert!(cache.contains("ns", "key2"));
    }

    #[test]
    fn test_cache_remove() {
        let mut cache = NamespaceCache::new(100);

        cache.touch_or_insert("ns", "key1", json!(1));
        cache.remove("ns", "key1");

        assert_eq!(cache.namespace_len("ns"), 0);
        assert_eq!(cache.lookup("ns", "key1"), None);
    }

    #[test]
    fn test_cache_remove_nonexistent() {
        let mut cache = NamespaceCache::new(100);

        // Neither the key nor the bucket exists - must not panic
        cache.remove("ns", "nonexistent");

        assert_eq!(cache.namespace_len("ns"), 0);
    }

    #[test]
    fn test_cache_reset() {
        let mut cache = NamespaceCache::new(100);

        cache.touch_or_insert("ns", "key1", json!(1));
        cache.touch_or_insert("ns", "key2", json!(2));
        cache.reset("ns");

        assert_eq!(cache.namespace_len("ns"), 0);
        assert_eq!(cache.lookup("ns", "key1"), None);
    }

    #[test]
    fn test_cache_namespace_isolation() {
        let mut cache = NamespaceCache::new(100);

        cache.touch_or_insert("ns_a", "key", json!("a"));
        cache.touch_or_insert("ns_b", "key", json!("b"));

        assert_eq!(cache.lookup("ns_a", "key"), Some(json!("a")));
        assert_eq!(cache.lookup("ns_b", "key"), Some(json!("b")));

        cache.remove("ns_a", "key");
        assert_eq!(cache.lookup("ns_a", "key"), None);
        assert_eq!(cache.lookup("ns_b", "key"), Some(json!("b")));
    }

    #[test]
    fn test_cache_capacity_per_namespace() {
        let mut cache = NamespaceCache::new(2);

        cache.touch_or_insert("ns_a", "key1", json!(1));
        cache.touch_or_insert("ns_a", "key2", json!(2));
        cache.touch_or_insert("ns_b", "key1", json!(1));
        cache.touch_or_insert("ns_b", "key2", json!(2));

        // Both namespaces hold their full capacity independently
        assert_eq!(cache.namespace_len("ns_a"), 2);
        assert_eq!(cache.namespace_len("ns_b"), 2);
    }

    #[test]
    fn test_cache_stats() {
        let mut cache = NamespaceCache::new(100);

        cache.touch_or_insert("ns", "key1", json!(1));
        cache.lookup("ns", "key1"); // hit
        cache.lookup("ns", "nonexistent"); // miss

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_cache_stats_count_evictions_per_namespace() {
        let mut cache = NamespaceCache::new(1);

        cache.touch_or_insert("ns_a", "key1", json!(1));
        cache.touch_or_insert("ns_a", "key2", json!(2));
        cache.touch_or_insert("ns_a", "key3", json!(3));
        cache.touch_or_insert("ns_b", "key1", json!(1));
        cache.touch_or_insert("ns_b", "key2", json!(2));

        let stats = cache.stats();
        assert_eq!(stats.evictions, 3);
        assert_eq!(stats.namespace_evictions("ns_a"), 2);
        assert_eq!(stats.namespace_evictions("ns_b"), 1);
        assert_eq!(stats.total_entries, 2);
    }
}
