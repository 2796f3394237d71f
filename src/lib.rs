//! Tuck - A namespaced key-value store
//!
//! Persists JSON values to SQLite, one table per namespace, with a bounded
//! per-namespace LRU cache in front of every read.

pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod store;

pub use config::Config;
pub use error::{Result, StoreError};
pub use store::{Store, DEFAULT_NAMESPACE};
