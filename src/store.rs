//! Store Module
//!
//! The public five-operation surface. Every call consults the in-memory
//! cache first and falls through to SQLite on a miss; every mutation is
//! durably committed before the cache is updated to reflect it.

use std::path::Path;

use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, info};

use crate::cache::{CacheStats, NamespaceCache};
use crate::config::Config;
use crate::db::SqliteBackend;
use crate::error::Result;

// == Public Constants ==
/// Namespace used when callers do not care about partitioning.
pub const DEFAULT_NAMESPACE: &str = "default";

// == Store ==
/// Namespaced key-value store with a bounded LRU read cache.
///
/// All operations take `&self`, so a single store value can be shared
/// across threads. The cache is a performance optimization only: SQLite
/// is authoritative, and a cache miss never implies absence.
pub struct Store {
    /// Durable backing store
    db: SqliteBackend,
    /// Per-namespace LRU cache
    cache: Mutex<NamespaceCache>,
}

impl Store {
    // == Constructors ==
    /// Opens a store at the given database path with the default cache size.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let config = Config {
            db_path: db_path.as_ref().to_path_buf(),
            ..Config::default()
        };
        Self::with_config(&config)
    }

    /// Opens a store using the given configuration.
    pub fn with_config(config: &Config) -> Result<Self> {
        let db = SqliteBackend::open(&config.db_path)?;
        info!(path = %config.db_path.display(), max_cache_size = config.max_cache_size, "store opened");
        Ok(Self {
            db,
            cache: Mutex::new(NamespaceCache::new(config.max_cache_size)),
        })
    }

    // == Check ==
    /// Checks whether a key exists in the given namespace.
    ///
    /// A cache hit answers immediately (and refreshes recency). A miss
    /// asks the database; existence alone carries no value payload, so
    /// the cache is not populated.
    pub fn check(&self, key: &str, namespace: &str) -> Result<bool> {
        if self.cache.lock().lookup(namespace, key).is_some() {
            debug!(namespace, key, "check: cache hit");
            return Ok(true);
        }

        self.db.ensure_table(namespace)?;
        let found = self.db.exists(namespace, key)?;
        debug!(namespace, key, found, "check: cache miss");
        Ok(found)
    }

    // == Get ==
    /// Retrieves the value for a key, or None if absent.
    ///
    /// On a cache miss the value is fetched from the database, decoded,
    /// and inserted into the cache. Absence is never cached.
    pub fn get(&self, key: &str, namespace: &str) -> Result<Option<Value>> {
        if let Some(value) = self.cache.lock().lookup(namespace, key) {
            debug!(namespace, key, "get: cache hit");
            return Ok(Some(value));
        }

        self.db.ensure_table(namespace)?;
        match self.db.fetch(namespace, key)? {
            Some(content) => {
                let value: Value = serde_json::from_str(&content)?;
                self.cache
                    .lock()
                    .touch_or_insert(namespace, key, value.clone());
                debug!(namespace, key, "get: cache miss, loaded from database");
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    // == Set ==
    /// Stores a key-value pair in the given namespace.
    ///
    /// The value is encoded and durably written first; the cache is only
    /// updated after the write succeeds, so it never holds a value that
    /// was not committed.
    pub fn set(&self, key: &str, value: Value, namespace: &str) -> Result<()> {
        let content = serde_json::to_string(&value)?;

        self.db.ensure_table(namespace)?;
        self.db.upsert(namespace, key, &content)?;

        self.cache.lock().touch_or_insert(namespace, key, value);
        debug!(namespace, key, "set: committed and cached");
        Ok(())
    }

    // == Delete ==
    /// Deletes a key from the given namespace.
    ///
    /// Deleting an absent key is a no-op, not an error. The cache entry
    /// is only dropped once the database delete has succeeded.
    pub fn delete(&self, key: &str, namespace: &str) -> Result<()> {
        self.db.ensure_table(namespace)?;
        self.db.delete_row(namespace, key)?;

        self.cache.lock().remove(namespace, key);
        debug!(namespace, key, "delete: removed");
        Ok(())
    }

    // == Clear ==
    /// Removes every entry in the given namespace.
    ///
    /// The namespace itself survives; it is simply empty afterwards.
    pub fn clear(&self, namespace: &str) -> Result<()> {
        self.db.ensure_table(namespace)?;
        self.db.delete_all(namespace)?;

        self.cache.lock().reset(namespace);
        debug!(namespace, "clear: namespace emptied");
        Ok(())
    }

    // == Cache Stats ==
    /// Returns a snapshot of cache statistics.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.lock().stats()
    }

    // == Cache Introspection ==
    /// Reports whether a key is currently held in the in-memory cache.
    ///
    /// Read-only: does not refresh recency. Intended for diagnostics and
    /// tests; presence in the cache says nothing about the database.
    pub fn is_cached(&self, key: &str, namespace: &str) -> bool {
        self.cache.lock().contains(namespace, key)
    }

    /// Returns the number of cached entries for a namespace.
    pub fn cached_len(&self, namespace: &str) -> usize {
        self.cache.lock().namespace_len(namespace)
    }
}
