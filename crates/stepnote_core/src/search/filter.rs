//! Title/keyword filtering and keyword suggestions.
//!
//! # Invariants
//! - An empty query filters nothing and suggests nothing.
//! - Title matching is a case-insensitive substring test.
//! - Keyword matching is an exact test against lower-cased tokens.
//! - Suggestions are distinct, alphabetical and capped.

use crate::config::SearchConfig;
use crate::model::page::Page;
use std::collections::BTreeSet;

/// Query options for suggestion lookups.
#[derive(Debug, Clone)]
pub struct SuggestQuery {
    /// Raw query text as typed.
    pub text: String,
    /// Maximum suggestions to return.
    pub limit: usize,
}

impl SuggestQuery {
    /// Creates a query with the default suggestion limit.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_config(text, &SearchConfig::default())
    }

    pub fn with_config(text: impl Into<String>, config: &SearchConfig) -> Self {
        Self {
            text: text.into(),
            limit: config.suggestion_limit,
        }
    }
}

/// Returns pages matching `query` by title substring or exact keyword.
///
/// Returns every page, in order, when `query` is empty.
pub fn filter<'a>(query: &str, pages: &'a [Page]) -> Vec<&'a Page> {
    if query.is_empty() {
        return pages.iter().collect();
    }

    let needle = query.to_lowercase();
    pages
        .iter()
        .filter(|page| page.title.to_lowercase().contains(&needle) || page.has_keyword(&needle))
        .collect()
}

/// Returns every distinct keyword across `pages`, sorted alphabetically.
pub fn all_keywords(pages: &[Page]) -> Vec<String> {
    pages
        .iter()
        .flat_map(|page| page.keywords.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Returns up to 10 keywords containing `query`, alphabetically.
pub fn suggest(query: &str, pages: &[Page]) -> Vec<String> {
    suggest_with(&SuggestQuery::new(query), pages)
}

/// Suggestion lookup with an explicit limit.
pub fn suggest_with(query: &SuggestQuery, pages: &[Page]) -> Vec<String> {
    if query.text.is_empty() || query.limit == 0 {
        return Vec::new();
    }

    let needle = query.text.to_lowercase();
    all_keywords(pages)
        .into_iter()
        .filter(|keyword| keyword.contains(&needle))
        .take(query.limit)
        .collect()
}
