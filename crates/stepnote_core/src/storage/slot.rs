//! JSON slot codec over key-value backends.
//!
//! # Responsibility
//! - Encode the page list as one JSON array under a single slot key.
//! - Recover from absent or malformed slot content with an empty list.
//!
//! # Invariants
//! - A malformed blob is never propagated as an error; it is logged and
//!   treated as an empty list.
//! - The slot key is the only schema version marker.

use super::{KeyValueBackend, PageStorage, StorageError, StorageResult};
use crate::config::StorageConfig;
use crate::model::page::Page;
use log::{debug, warn};
use std::collections::HashMap;

/// `PageStorage` that keeps the page list in one backend slot.
pub struct SlotStorage<B: KeyValueBackend> {
    backend: B,
    key: String,
}

impl<B: KeyValueBackend> SlotStorage<B> {
    /// Creates slot storage using the configured slot key.
    pub fn new(backend: B, config: &StorageConfig) -> Self {
        Self::with_key(backend, config.slot_key.clone())
    }

    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: KeyValueBackend> PageStorage for SlotStorage<B> {
    fn load(&self) -> StorageResult<Vec<Page>> {
        let Some(raw) = self.backend.get(&self.key)? else {
            debug!("event=slot_load module=storage status=empty reason=absent");
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<Page>>(&raw) {
            Ok(pages) => {
                debug!(
                    "event=slot_load module=storage status=ok page_count={}",
                    pages.len()
                );
                Ok(pages)
            }
            Err(err) => {
                warn!(
                    "event=slot_load module=storage status=fallback reason=malformed bytes={} line={} column={}",
                    raw.len(),
                    err.line(),
                    err.column()
                );
                Ok(Vec::new())
            }
        }
    }

    fn save(&mut self, pages: &[Page]) -> StorageResult<()> {
        let encoded = serde_json::to_string(pages).map_err(StorageError::Encode)?;
        self.backend.set(&self.key, &encoded)?;
        debug!(
            "event=slot_save module=storage status=ok page_count={} bytes={}",
            pages.len(),
            encoded.len()
        );
        Ok(())
    }
}

/// Process-local backend, the in-memory equivalent of browser storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    slots: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend with one pre-populated slot.
    pub fn with_slot(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut slots = HashMap::new();
        slots.insert(key.into(), value.into());
        Self { slots }
    }

    /// Returns raw slot content, if any.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
