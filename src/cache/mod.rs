//! Cache Module
//!
//! Provides the bounded in-memory LRU cache that fronts the SQLite store.
//! Each namespace owns an independent bucket; the configured capacity is
//! enforced per bucket, not globally.

mod recency;
mod stats;
mod store;


// Re-export public types
pub use recency::RecencyTracker;
pub use stats::CacheStats;
pub use store::NamespaceCache;
