//! SQLite key-value backend.
//!
//! # Responsibility
//! - Store named string slots in the `kv_slots` table.
//! - Keep SQL details inside the storage boundary.
//!
//! # Invariants
//! - The connection must be migrated to the latest schema before use.
//! - `set` is an upsert; one key maps to at most one row.

use super::{KeyValueBackend, StorageError, StorageResult};
use crate::db::migrations::latest_version;
use crate::db::{schema_version, table_exists};
use rusqlite::{params, Connection, OptionalExtension};

/// SQLite-backed slot store over a borrowed, migrated connection.
#[derive(Debug)]
pub struct SqliteKvBackend<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvBackend<'conn> {
    /// Constructs a backend after checking schema readiness.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    /// - `MissingRequiredTable` when `kv_slots` is missing.
    pub fn try_new(conn: &'conn Connection) -> StorageResult<Self> {
        ensure_kv_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl KeyValueBackend for SqliteKvBackend<'_> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_slots WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_slots (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

fn ensure_kv_connection_ready(conn: &Connection) -> StorageResult<()> {
    let expected_version = latest_version();
    let actual_version = schema_version(conn)?;
    if actual_version != expected_version {
        return Err(StorageError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }
    if !table_exists(conn, "kv_slots")? {
        return Err(StorageError::MissingRequiredTable("kv_slots"));
    }
    Ok(())
}
