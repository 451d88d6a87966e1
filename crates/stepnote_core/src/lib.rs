//! Core domain logic for stepnote, a step-by-step page keeper.
//! This crate is the single source of truth for page invariants.

pub mod config;
pub mod db;
pub mod keywords;
pub mod logging;
pub mod model;
pub mod search;
pub mod service;
pub mod storage;

pub use config::{ConfigError, KeywordConfig, SearchConfig, StepnoteConfig, StorageConfig};
pub use keywords::{extract_keywords, extract_keywords_with, page_keyword_source};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::page::{split_steps, Page, PageDraft, PageId, PageValidationError};
pub use search::filter::{all_keywords, filter, suggest, suggest_with, SuggestQuery};
pub use service::editor::{
    ConfirmationRequest, Editor, EditorMode, Notice, PendingAction, ResolveOutcome, SaveOutcome,
};
pub use service::page_store::{Confirmation, PageStore, RemoveOutcome, StoreError, StoreResult};
pub use storage::{
    KeyValueBackend, MemoryBackend, PageStorage, SlotStorage, SqliteKvBackend, StorageError,
    StorageResult,
};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
