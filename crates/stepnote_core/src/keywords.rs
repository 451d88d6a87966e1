//! Keyword extraction for page tagging.
//!
//! # Responsibility
//! - Turn free text into a short, ranked list of lower-cased tokens.
//!
//! # Invariants
//! - Output is deterministic for identical input and config.
//! - Ranking is count descending, ties in first-occurrence order.
//! - Only `a-z`, `à-ú` and `0-9` survive tokenization.

use crate::config::KeywordConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static NON_TOKEN_CHAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zà-ú0-9 ]").expect("valid token char regex"));

/// Extracts ranked keywords using the default [`KeywordConfig`].
pub fn extract_keywords(text: &str) -> Vec<String> {
    extract_keywords_with(text, &KeywordConfig::default())
}

/// Extracts ranked keywords with an explicit config.
///
/// Rules:
/// - lower-case, then replace every char outside the token set with a space;
/// - split on whitespace runs;
/// - drop tokens shorter than `min_token_len` chars and stop words;
/// - rank by frequency, keep at most `max_keywords`.
pub fn extract_keywords_with(text: &str, config: &KeywordConfig) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let lowered = text.to_lowercase();
    let cleaned = NON_TOKEN_CHAR_RE.replace_all(&lowered, " ");

    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();
    for token in cleaned.split_whitespace() {
        if token.chars().count() < config.min_token_len || config.is_stop_word(token) {
            continue;
        }
        match slots.get(token) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(token, counts.len());
                counts.push((token, 1));
            }
        }
    }

    // Stable: equal counts keep first-occurrence order.
    counts.sort_by(|left, right| right.1.cmp(&left.1));
    counts
        .into_iter()
        .take(config.max_keywords)
        .map(|(token, _)| token.to_string())
        .collect()
}

/// Builds extractor input for a page: title, then steps, space separated.
pub fn page_keyword_source(title: &str, steps: &[String]) -> String {
    format!("{title} {}", steps.join(" "))
}

#[cfg(test)]
mod tests {
    use super::{extract_keywords, extract_keywords_with, page_keyword_source};
    use crate::config::KeywordConfig;

    #[test]
    fn short_tokens_are_discarded() {
        assert_eq!(extract_keywords("a a a bb bb ccc"), vec!["ccc".to_string()]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(extract_keywords("").is_empty());
        assert!(extract_keywords("   \n\t ").is_empty());
    }

    #[test]
    fn stop_words_are_removed() {
        assert_eq!(
            extract_keywords("para que como uma receita"),
            vec!["receita".to_string()]
        );
    }

    #[test]
    fn punctuation_splits_tokens_and_case_is_folded() {
        assert_eq!(
            extract_keywords("Router-RESET, router!"),
            vec!["router".to_string(), "reset".to_string()]
        );
    }

    #[test]
    fn accented_range_is_kept_but_other_letters_split() {
        let keywords = extract_keywords("café çaé straße");
        assert_eq!(
            keywords,
            vec!["café".to_string(), "çaé".to_string(), "stra".to_string()]
        );
    }

    #[test]
    fn ties_keep_first_occurrence_order() {
        assert_eq!(
            extract_keywords("zeta alpha zeta alpha beta"),
            vec!["zeta".to_string(), "alpha".to_string(), "beta".to_string()]
        );
    }

    #[test]
    fn output_is_capped_by_config() {
        let text = (0..40)
            .map(|idx| format!("word{idx:02}"))
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(extract_keywords(&text).len(), 30);

        let config = KeywordConfig {
            max_keywords: 3,
            ..KeywordConfig::default()
        };
        assert_eq!(
            extract_keywords_with(&text, &config),
            vec!["word00".to_string(), "word01".to_string(), "word02".to_string()]
        );
    }

    #[test]
    fn page_source_joins_title_and_steps() {
        let steps = vec!["one".to_string(), "two".to_string()];
        assert_eq!(page_keyword_source("Title", &steps), "Title one two");
    }
}
