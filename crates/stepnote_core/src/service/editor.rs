//! Editor session state for hosts that render the page list.
//!
//! # Responsibility
//! - Hold transient form state (title, steps text, editing target).
//! - Reconcile the form into the page store on save.
//! - Hold the search box query and its keyword suggestions.
//! - Turn destructive actions into explicit confirmation requests.
//!
//! # Invariants
//! - The editor never writes to the store except through `save` and
//!   `resolve` with a granted confirmation.
//! - A rejected save keeps the form open and unchanged.

use crate::config::SearchConfig;
use crate::model::page::{Page, PageDraft, PageId, PageValidationError};
use crate::search::filter::{filter, suggest_with, SuggestQuery};
use crate::service::page_store::{Confirmation, PageStore, RemoveOutcome, StoreError, StoreResult};
use crate::storage::PageStorage;

const REMOVE_PROMPT: &str = "Remove page?";
const CLEAR_ALL_PROMPT: &str = "Remove all pages?";

/// Editor mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Idle,
    CreatingNew,
    EditingExisting(PageId),
}

/// User-facing notice produced by a rejected action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

impl From<PageValidationError> for Notice {
    fn from(value: PageValidationError) -> Self {
        Self {
            message: value.to_string(),
        }
    }
}

/// Result of an editor save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Page was created or updated; editor is back to idle.
    Saved(Page),
    /// Input was rejected; editor stays open.
    Rejected(Notice),
    /// There was no open form to save.
    NotEditing,
}

/// Destructive action awaiting user confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    Remove(PageId),
    ClearAll,
}

/// Prompt the host must show before a destructive action runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationRequest {
    pub action: PendingAction,
    pub prompt: &'static str,
}

/// Result of resolving a confirmation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveOutcome {
    Removed(RemoveOutcome),
    Cleared(usize),
    Aborted,
}

/// Transient editor and search state.
#[derive(Debug, Clone)]
pub struct Editor {
    mode: EditorMode,
    draft: PageDraft,
    search: String,
    suggestions: Vec<String>,
    search_config: SearchConfig,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl Editor {
    pub fn new(search_config: SearchConfig) -> Self {
        Self {
            mode: EditorMode::Idle,
            draft: PageDraft::default(),
            search: String::new(),
            suggestions: Vec::new(),
            search_config,
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.mode != EditorMode::Idle
    }

    pub fn draft(&self) -> &PageDraft {
        &self.draft
    }

    /// Opens an empty form for a new page.
    pub fn open_new(&mut self) {
        self.draft = PageDraft::default();
        self.mode = EditorMode::CreatingNew;
    }

    /// Opens the form pre-filled from an existing page.
    ///
    /// # Errors
    /// - `NotFound` when the store has no page with `id`; editor unchanged.
    pub fn open_edit<S: PageStorage>(
        &mut self,
        store: &PageStore<S>,
        id: PageId,
    ) -> StoreResult<()> {
        let page = store.get(id).ok_or(StoreError::NotFound(id))?;
        self.draft = PageDraft::new(page.title.clone(), page.steps_text());
        self.mode = EditorMode::EditingExisting(id);
        Ok(())
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_steps_text(&mut self, steps_text: impl Into<String>) {
        self.draft.steps_text = steps_text.into();
    }

    /// Closes the form without touching the store.
    pub fn cancel(&mut self) {
        self.mode = EditorMode::Idle;
    }

    /// Saves the open form into the store.
    ///
    /// # Errors
    /// - `NotFound` when the edited page disappeared; the form stays open.
    /// - `Storage` when the write fails; the form stays open. A new page
    ///   is already in the store at that point, so the form switches to
    ///   editing it and a retry re-persists instead of appending again.
    pub fn save<S: PageStorage>(&mut self, store: &mut PageStore<S>) -> StoreResult<SaveOutcome> {
        let result = match self.mode {
            EditorMode::Idle => return Ok(SaveOutcome::NotEditing),
            EditorMode::CreatingNew => store.create_from(&self.draft),
            EditorMode::EditingExisting(id) => store.update_from(id, &self.draft),
        };

        match result {
            Ok(page) => {
                self.mode = EditorMode::Idle;
                self.refresh_suggestions(store.list());
                Ok(SaveOutcome::Saved(page))
            }
            Err(StoreError::Validation(err)) => Ok(SaveOutcome::Rejected(err.into())),
            Err(err @ StoreError::Storage(_)) => {
                if self.mode == EditorMode::CreatingNew {
                    if let Some(page) = store.list().last() {
                        self.mode = EditorMode::EditingExisting(page.id);
                    }
                }
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Updates the search query and recomputes suggestions.
    pub fn set_search(&mut self, query: impl Into<String>, pages: &[Page]) {
        self.search = query.into();
        self.refresh_suggestions(pages);
    }

    /// Uses a suggestion as the query and hides the suggestion list.
    pub fn pick_suggestion(&mut self, keyword: impl Into<String>) {
        self.search = keyword.into();
        self.suggestions.clear();
    }

    /// Pages matching the current query, in store order.
    pub fn visible_pages<'a>(&self, pages: &'a [Page]) -> Vec<&'a Page> {
        filter(&self.search, pages)
    }

    pub fn request_remove(&self, id: PageId) -> ConfirmationRequest {
        ConfirmationRequest {
            action: PendingAction::Remove(id),
            prompt: REMOVE_PROMPT,
        }
    }

    pub fn request_clear_all(&self) -> ConfirmationRequest {
        ConfirmationRequest {
            action: PendingAction::ClearAll,
            prompt: CLEAR_ALL_PROMPT,
        }
    }

    /// Runs a confirmed action against the store.
    ///
    /// A denied confirmation returns `Aborted` without touching the store.
    pub fn resolve<S: PageStorage>(
        &mut self,
        store: &mut PageStore<S>,
        request: &ConfirmationRequest,
        confirmation: Confirmation,
    ) -> StoreResult<ResolveOutcome> {
        let outcome = match (request.action, confirmation) {
            (_, Confirmation::Denied) => return Ok(ResolveOutcome::Aborted),
            (PendingAction::Remove(id), Confirmation::Granted) => {
                ResolveOutcome::Removed(store.remove(id, Confirmation::Granted)?)
            }
            (PendingAction::ClearAll, Confirmation::Granted) => {
                ResolveOutcome::Cleared(store.clear_all()?)
            }
        };
        self.refresh_suggestions(store.list());
        Ok(outcome)
    }

    fn refresh_suggestions(&mut self, pages: &[Page]) {
        let query = SuggestQuery::with_config(self.search.as_str(), &self.search_config);
        self.suggestions = suggest_with(&query, pages);
    }
}
