//! Cache Statistics Module
//!
//! Counters for cache effectiveness: hits, misses, and evictions, with
//! evictions additionally broken down per namespace.

use std::collections::HashMap;

use serde::Serialize;

// == Cache Stats ==
/// Cache effectiveness counters.
///
/// Hit and miss counts are store-wide; eviction counts are kept both as
/// a total and per namespace, since each namespace enforces the bound
/// independently.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Lookups served from memory
    pub hits: u64,
    /// Lookups that fell through to the database
    pub misses: u64,
    /// Entries evicted by LRU policy, all namespaces combined
    pub evictions: u64,
    /// Eviction counts per namespace
    pub evictions_by_namespace: HashMap<String, u64>,
    /// Cached entries across all namespaces at snapshot time
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a CacheStats with every counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Fraction of lookups served from memory, 0.0 when none were made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Recording ==
    /// Counts a lookup served from memory.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Counts a lookup that fell through to the database.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Counts an eviction against the namespace it happened in.
    pub fn record_eviction(&mut self, namespace: &str) {
        self.evictions += 1;
        *self
            .evictions_by_namespace
            .entry(namespace.to_string())
            .or_default() += 1;
    }

    // == Accessors ==
    /// Evictions recorded for one namespace.
    pub fn namespace_evictions(&self, namespace: &str) -> u64 {
        self.evictions_by_namespace
            .get(namespace)
            .copied()
            .unwrap_or(0)
    }

    /// Updates the entry count for a snapshot.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
