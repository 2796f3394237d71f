//! SQLite Backend Module
//!
//! Durable storage: one two-column table per namespace in a single SQLite
//! database file. Every write is committed before the call returns.

use std::path::Path;

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Result, StoreError};

// == Namespace Validation ==
/// Maximum accepted namespace length in bytes.
pub const MAX_NAMESPACE_LENGTH: usize = 128;

/// Validates a namespace for use as a table identifier.
///
/// Namespaces are interpolated into SQL as structural identifiers, so the
/// accepted character set is restricted to `[A-Za-z_][A-Za-z0-9_]*`.
/// Anything else is rejected before any SQL is built.
pub fn validate_namespace(namespace: &str) -> Result<()> {
    if namespace.is_empty() || namespace.len() > MAX_NAMESPACE_LENGTH {
        return Err(StoreError::InvalidNamespace(namespace.to_string()));
    }

    let mut chars = namespace.chars();
    let first = chars.next().unwrap_or('\0');
    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(StoreError::InvalidNamespace(namespace.to_string()));
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(StoreError::InvalidNamespace(namespace.to_string()));
    }

    Ok(())
}

/// Returns the namespace as a quoted SQL identifier.
///
/// Callers must have run `validate_namespace` first.
fn table_ident(namespace: &str) -> String {
    format!("\"{}\"", namespace)
}

// == SQLite Backend ==
/// SQLite-backed durable store.
///
/// Thread-safe via an internal mutex on the connection. Single-row
/// upserts and deletes run in autocommit mode, so each one is durably
/// committed when the call returns.
pub struct SqliteBackend {
    /// Database connection, shared by all operations
    conn: Mutex<Connection>,
}

impl SqliteBackend {
    // == Constructor ==
    /// Opens (or creates) the database at the specified path.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        // WAL keeps readers from blocking behind writers
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    // == Ensure Table ==
    /// Idempotently creates the namespace's table if it does not exist.
    pub fn ensure_table(&self, namespace: &str) -> Result<()> {
        validate_namespace(namespace)?;
        let conn = self.conn.lock();
        conn.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS {} (id TEXT PRIMARY KEY, content TEXT)",
                table_ident(namespace)
            ),
            [],
        )?;
        Ok(())
    }

    // == Exists ==
    /// Checks whether a key has a row in the namespace's table.
    pub fn exists(&self, namespace: &str, key: &str) -> Result<bool> {
        validate_namespace(namespace)?;
        let conn = self.conn.lock();
        let found = conn
            .query_row(
                &format!("SELECT 1 FROM {} WHERE id = ?1", table_ident(namespace)),
                params![key],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    // == Fetch ==
    /// Returns the raw stored content for a key, or None if absent.
    pub fn fetch(&self, namespace: &str, key: &str) -> Result<Option<String>> {
        validate_namespace(namespace)?;
        let conn = self.conn.lock();
        let content = conn
            .query_row(
                &format!("SELECT content FROM {} WHERE id = ?1", table_ident(namespace)),
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(content)
    }

    // == Upsert ==
    /// Inserts or replaces the row for a key. Committed on return.
    pub fn upsert(&self, namespace: &str, key: &str, content: &str) -> Result<()> {
        validate_namespace(namespace)?;
        let conn = self.conn.lock();
        conn.execute(
            &format!(
                "INSERT OR REPLACE INTO {} (id, content) VALUES (?1, ?2)",
                table_ident(namespace)
            ),
            params![key, content],
        )?;
        Ok(())
    }

    // == Delete Row ==
    /// Deletes the row for a key. No-op if the key has no row.
    pub fn delete_row(&self, namespace: &str, key: &str) -> Result<()> {
        validate_namespace(namespace)?;
        let conn = self.conn.lock();
        conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1", table_ident(namespace)),
            params![key],
        )?;
        Ok(())
    }

    // == Delete All ==
    /// Deletes every row in the namespace's table.
    pub fn delete_all(&self, namespace: &str) -> Result<()> {
        validate_namespace(namespace)?;
        let conn = self.conn.lock();
        conn.execute(&format!("DELETE FROM {}", table_ident(namespace)), [])?;
        Ok(())
    }
}
