//! Configuration Module
//!
//! Handles loading and managing store configuration from environment variables.

use std::env;
use std::path::PathBuf;

/// Store configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the SQLite database file
    pub db_path: PathBuf,
    /// Maximum number of cached entries per namespace
    pub max_cache_size: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `TUCK_DB_PATH` - Database file path (default: tuck.db)
    /// - `TUCK_MAX_CACHE_SIZE` - Cached entries per namespace (default: 1000)
    pub fn from_env() -> Self {
        Self {
            db_path: env::var("TUCK_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("tuck.db")),
            max_cache_size: env::var("TUCK_MAX_CACHE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("tuck.db"),
            max_cache_size: 1000,
        }
    }
}
