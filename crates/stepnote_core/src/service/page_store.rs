//! Page store use-case service.
//!
//! # Responsibility
//! - Own the in-memory page list and its create/update/remove/clear flows.
//! - Derive steps and keywords from raw input on every save.
//! - Mirror the full list to the injected `PageStorage` after each mutation.
//!
//! # Invariants
//! - `list()` keeps insertion order; updates never move a page.
//! - Page ids are unique within one store.
//! - A rejected or aborted operation changes nothing and writes nothing.
//! - A mutation is applied in memory before the write; a failed write is
//!   reported but the in-memory state is kept.

use crate::config::KeywordConfig;
use crate::model::page::{Page, PageDraft, PageId, PageValidationError};
use crate::search::filter::all_keywords;
use crate::storage::{PageStorage, StorageError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

pub type StoreResult<T> = Result<T, StoreError>;

/// Service error for page store use-cases.
#[derive(Debug)]
pub enum StoreError {
    /// Input rejected before any state change.
    Validation(PageValidationError),
    /// Target page does not exist.
    NotFound(PageId),
    /// Loading or persisting the page list failed.
    Storage(StorageError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "page not found: {id}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<PageValidationError> for StoreError {
    fn from(value: PageValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Explicit answer to a destructive-action prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Granted,
    Denied,
}

impl Confirmation {
    pub fn from_bool(granted: bool) -> Self {
        if granted {
            Self::Granted
        } else {
            Self::Denied
        }
    }
}

/// Result of a remove request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// Page was removed and the list persisted.
    Removed(Page),
    /// No page has the requested id; nothing was written.
    NotFound,
    /// Confirmation was denied; nothing was written.
    Aborted,
}

/// Page store facade over a storage implementation.
pub struct PageStore<S: PageStorage> {
    pages: Vec<Page>,
    storage: S,
    keyword_config: KeywordConfig,
}

impl<S: PageStorage> PageStore<S> {
    /// Loads the store from storage with the default keyword config.
    pub fn load(storage: S) -> StoreResult<Self> {
        Self::load_with(storage, KeywordConfig::default())
    }

    /// Loads the store from storage.
    ///
    /// Absent or malformed persisted data yields an empty store.
    pub fn load_with(storage: S, keyword_config: KeywordConfig) -> StoreResult<Self> {
        let pages = storage.load().map_err(|err| {
            error!("event=store_load module=store status=error error={err}");
            StoreError::Storage(err)
        })?;
        info!(
            "event=store_load module=store status=ok page_count={}",
            pages.len()
        );
        Ok(Self {
            pages,
            storage,
            keyword_config,
        })
    }

    /// Returns all pages in insertion order.
    pub fn list(&self) -> &[Page] {
        &self.pages
    }

    pub fn get(&self, id: PageId) -> Option<&Page> {
        self.pages.iter().find(|page| page.id == id)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Distinct keywords across all pages, alphabetically.
    pub fn all_keywords(&self) -> Vec<String> {
        all_keywords(&self.pages)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Creates and appends a page from raw title and steps text.
    pub fn create(&mut self, title: &str, steps_text: &str) -> StoreResult<Page> {
        self.create_from(&PageDraft::new(title, steps_text))
    }

    /// Creates and appends a page from a draft.
    ///
    /// # Errors
    /// - `Validation` when the title is blank; nothing is written.
    /// - `Storage` when the write fails; the page stays in memory.
    pub fn create_from(&mut self, draft: &PageDraft) -> StoreResult<Page> {
        let id = self.next_id();
        let page = Page::build(id, draft, &self.keyword_config).map_err(|err| {
            info!("event=page_create module=store status=rejected reason={err}");
            err
        })?;

        self.pages.push(page.clone());
        self.persist("page_create")?;
        info!(
            "event=page_create module=store status=ok page_id={} step_count={} keyword_count={}",
            page.id,
            page.steps.len(),
            page.keywords.len()
        );
        Ok(page)
    }

    /// Replaces title/steps/keywords of an existing page in place.
    pub fn update(&mut self, id: PageId, title: &str, steps_text: &str) -> StoreResult<Page> {
        self.update_from(id, &PageDraft::new(title, steps_text))
    }

    /// Replaces an existing page from a draft, keeping id and position.
    ///
    /// # Errors
    /// - `NotFound` when no page has `id`.
    /// - `Validation` when the title is blank.
    /// - `Storage` when the write fails; the update stays in memory.
    pub fn update_from(&mut self, id: PageId, draft: &PageDraft) -> StoreResult<Page> {
        let keyword_config = &self.keyword_config;
        let Some(page) = self.pages.iter_mut().find(|page| page.id == id) else {
            info!("event=page_update module=store status=not_found page_id={id}");
            return Err(StoreError::NotFound(id));
        };
        page.apply(draft, keyword_config).map_err(|err| {
            info!("event=page_update module=store status=rejected page_id={id} reason={err}");
            err
        })?;
        let updated = page.clone();

        self.persist("page_update")?;
        info!(
            "event=page_update module=store status=ok page_id={} step_count={} keyword_count={}",
            updated.id,
            updated.steps.len(),
            updated.keywords.len()
        );
        Ok(updated)
    }

    /// Removes one page once the caller has confirmed.
    ///
    /// Denied confirmation and unknown ids are no-ops without a write.
    pub fn remove(
        &mut self,
        id: PageId,
        confirmation: Confirmation,
    ) -> StoreResult<RemoveOutcome> {
        if confirmation == Confirmation::Denied {
            info!("event=page_remove module=store status=aborted page_id={id}");
            return Ok(RemoveOutcome::Aborted);
        }

        let Some(index) = self.pages.iter().position(|page| page.id == id) else {
            info!("event=page_remove module=store status=not_found page_id={id}");
            return Ok(RemoveOutcome::NotFound);
        };

        let removed = self.pages.remove(index);
        self.persist("page_remove")?;
        info!("event=page_remove module=store status=ok page_id={id}");
        Ok(RemoveOutcome::Removed(removed))
    }

    /// Empties the store and persists immediately.
    ///
    /// Returns the number of pages dropped. Bulk confirmation is the
    /// caller's concern.
    pub fn clear_all(&mut self) -> StoreResult<usize> {
        let dropped = self.pages.len();
        self.pages.clear();
        self.persist("store_clear")?;
        info!("event=store_clear module=store status=ok dropped_count={dropped}");
        Ok(dropped)
    }

    /// Creation-time id, bumped past the current maximum on collision.
    fn next_id(&self) -> PageId {
        let now = now_epoch_ms();
        if self.get(now).is_none() {
            return now;
        }
        let max = self.pages.iter().map(|page| page.id).max().unwrap_or(now);
        max.saturating_add(1)
    }

    fn persist(&mut self, event: &'static str) -> StoreResult<()> {
        self.storage.save(&self.pages).map_err(|err| {
            error!(
                "event={} module=store status=error error_code=persist_failed page_count={} error={}",
                event,
                self.pages.len(),
                err
            );
            StoreError::Storage(err)
        })
    }
}

fn now_epoch_ms() -> PageId {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
