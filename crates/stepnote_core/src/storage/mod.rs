//! Persistence contracts for the page list.
//!
//! # Responsibility
//! - Define the `PageStorage` collaborator injected into the page store.
//! - Define the `KeyValueBackend` contract for named string slots.
//! - Isolate backend details (SQLite, memory) from store orchestration.
//!
//! # Invariants
//! - One slot holds the whole page list as one JSON array.
//! - `save` replaces the slot content fully; there are no partial writes.

use crate::db::DbError;
use crate::model::page::Page;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod slot;
pub mod sqlite;

pub use slot::{MemoryBackend, SlotStorage};
pub use sqlite::SqliteKvBackend;

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage-layer error for backend access and blob encoding.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    /// Page list could not be encoded as JSON.
    Encode(serde_json::Error),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    /// Backend-specific failure without a richer source.
    Backend(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode pages: {err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "slot storage requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "slot storage requires table `{table}`")
            }
            Self::Backend(message) => write!(f, "storage backend failure: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::Backend(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Collaborator that loads and saves the full page list.
pub trait PageStorage {
    /// Loads all pages in stored order.
    ///
    /// Absent or unreadable data yields an empty list, not an error.
    fn load(&self) -> StorageResult<Vec<Page>>;
    /// Replaces stored pages with `pages`.
    fn save(&mut self, pages: &[Page]) -> StorageResult<()>;
}

/// Named string slots, modeled after browser local storage.
pub trait KeyValueBackend {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
}
