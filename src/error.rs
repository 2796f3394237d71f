//! Error types for the store
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Store Error Enum ==
/// Unified error type for store operations.
///
/// Absence of a key is never an error: `get` returns `None` and `check`
/// returns `false` instead.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backing database failure, propagated unmodified
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// Value could not be encoded, or stored content could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Namespace is not usable as a table identifier
    #[error("Invalid namespace: {0}")]
    InvalidNamespace(String),
}

// == Result Type Alias ==
/// Convenience Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
