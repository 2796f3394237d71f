//! Recency Tracker Module
//!
//! Tracks access order for LRU eviction.

use std::collections::{BTreeMap, HashMap};

// == Recency Tracker ==
/// Tracks a total recency order over keys.
///
/// Every touch assigns the key a fresh sequence number from a monotonic
/// counter, so the order is total and needs no tie-break. The `BTreeMap`
/// index orders keys by sequence number; its first entry is always the
/// least recently used key.
#[derive(Debug, Default)]
pub struct RecencyTracker {
    /// Current sequence number per key
    seq_of: HashMap<String, u64>,
    /// Keys ordered by sequence number; first entry = least recently used
    order: BTreeMap<u64, String>,
    /// Next sequence number to hand out
    next_seq: u64,
}

impl RecencyTracker {
    // == Constructor ==
    /// Creates a new empty recency tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as most recently used.
    ///
    /// If the key is already tracked its old position is dropped first;
    /// if it is new, it is simply added at the most-recent end.
    pub fn touch(&mut self, key: &str) {
        if let Some(old_seq) = self.seq_of.remove(key) {
            self.order.remove(&old_seq);
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.seq_of.insert(key.to_string(), seq);
        self.order.insert(seq, key.to_string());
    }

    // == Remove ==
    /// Removes a key from the tracker. No-op if the key is not tracked.
    pub fn remove(&mut self, key: &str) {
        if let Some(seq) = self.seq_of.remove(key) {
            self.order.remove(&seq);
        }
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if the tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let (&seq, _) = self.order.iter().next()?;
        let key = self.order.remove(&seq)?;
        self.seq_of.remove(&key);
        Some(key)
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&String> {
        self.order.values().next()
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.seq_of.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.seq_of.is_empty()
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    pub fn contains(&self, key: &str) -> bool {
        self.seq_of.contains_key(key)
    }
}
