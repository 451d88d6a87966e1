//! Page domain model.
//!
//! # Responsibility
//! - Define the persisted page record and its wire field names.
//! - Turn raw editor input (`PageDraft`) into validated page fields.
//!
//! # Invariants
//! - `title` is stored trimmed and is never empty.
//! - `steps` keep input order; blank lines are dropped and each line trimmed.
//! - `keywords` are recomputed from title + steps on every build/apply.

use crate::config::KeywordConfig;
use crate::keywords::{extract_keywords_with, page_keyword_source};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable page identifier.
///
/// Creation-time epoch milliseconds, kept numeric to match the stored blob.
pub type PageId = i64;

/// Validation failures for page input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageValidationError {
    /// Title is empty after trimming.
    EmptyTitle,
}

impl Display for PageValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title is required"),
        }
    }
}

impl Error for PageValidationError {}

/// Raw editor input for one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageDraft {
    /// Title as typed by the user.
    pub title: String,
    /// Steps as one multi-line text, one step per line.
    pub steps_text: String,
}

impl PageDraft {
    pub fn new(title: impl Into<String>, steps_text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            steps_text: steps_text.into(),
        }
    }

    /// Returns the trimmed title, or `EmptyTitle` when nothing is left.
    pub fn normalized_title(&self) -> Result<String, PageValidationError> {
        let trimmed = self.title.trim();
        if trimmed.is_empty() {
            return Err(PageValidationError::EmptyTitle);
        }
        Ok(trimmed.to_string())
    }

    /// Splits `steps_text` into trimmed, non-empty lines.
    pub fn split_steps(&self) -> Vec<String> {
        split_steps(&self.steps_text)
    }
}

/// Canonical page record.
///
/// Serialized field names (`id`, `title`, `steps`, `keywords`) are the
/// persisted wire format and must not change without a new slot key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    pub title: String,
    pub steps: Vec<String>,
    pub keywords: Vec<String>,
}

impl Page {
    /// Builds a new page from a draft, deriving steps and keywords.
    ///
    /// # Errors
    /// - `EmptyTitle` when the draft title is blank.
    pub fn build(
        id: PageId,
        draft: &PageDraft,
        config: &KeywordConfig,
    ) -> Result<Self, PageValidationError> {
        let mut page = Self {
            id,
            title: String::new(),
            steps: Vec::new(),
            keywords: Vec::new(),
        };
        page.apply(draft, config)?;
        Ok(page)
    }

    /// Replaces title, steps and keywords from a draft, keeping `id`.
    ///
    /// The page is left untouched when validation fails.
    pub fn apply(
        &mut self,
        draft: &PageDraft,
        config: &KeywordConfig,
    ) -> Result<(), PageValidationError> {
        let title = draft.normalized_title()?;
        let steps = draft.split_steps();
        let keywords = extract_keywords_with(&page_keyword_source(&title, &steps), config);

        self.title = title;
        self.steps = steps;
        self.keywords = keywords;
        Ok(())
    }

    /// Returns steps joined back into editor text.
    pub fn steps_text(&self) -> String {
        self.steps.join("\n")
    }

    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|value| value == keyword)
    }
}

/// Splits multi-line step text on `\n`, trimming each line and dropping
/// blanks. A trailing `\r` from CRLF input is removed by the trim.
pub fn split_steps(steps_text: &str) -> Vec<String> {
    steps_text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{split_steps, Page, PageDraft, PageValidationError};
    use crate::config::KeywordConfig;

    #[test]
    fn split_steps_drops_blank_lines_and_trims() {
        let steps = split_steps("  first \r\n\n   \nsecond\n");
        assert_eq!(steps, vec!["first".to_string(), "second".to_string()]);
    }

    #[test]
    fn build_rejects_blank_title() {
        let draft = PageDraft::new("   ", "step");
        let err = Page::build(1, &draft, &KeywordConfig::default()).unwrap_err();
        assert_eq!(err, PageValidationError::EmptyTitle);
    }

    #[test]
    fn apply_keeps_page_untouched_on_validation_error() {
        let config = KeywordConfig::default();
        let mut page = Page::build(7, &PageDraft::new("Boil water", "fill kettle"), &config)
            .expect("valid draft");
        let before = page.clone();

        let err = page.apply(&PageDraft::new("", "other"), &config).unwrap_err();
        assert_eq!(err, PageValidationError::EmptyTitle);
        assert_eq!(page, before);
    }

    #[test]
    fn steps_text_joins_with_newlines() {
        let page = Page::build(
            1,
            &PageDraft::new("Title", "one\n\ntwo"),
            &KeywordConfig::default(),
        )
        .expect("valid draft");
        assert_eq!(page.steps_text(), "one\ntwo");
    }
}
