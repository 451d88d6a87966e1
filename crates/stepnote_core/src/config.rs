//! Core configuration.
//!
//! # Responsibility
//! - Hold tunables for keyword extraction, search suggestions and storage.
//! - Parse optional JSON overrides supplied by the host.
//!
//! # Invariants
//! - `Default` values reproduce the documented contract constants.
//! - Missing JSON fields fall back to defaults field by field.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default storage slot holding the JSON page array.
pub const DEFAULT_SLOT_KEY: &str = "stepPages_v1";
/// Maximum keywords kept per page.
pub const DEFAULT_MAX_KEYWORDS: usize = 30;
/// Tokens shorter than this (in chars) are discarded.
pub const DEFAULT_MIN_TOKEN_LEN: usize = 3;
/// Maximum keyword suggestions returned for a query.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;

const DEFAULT_STOP_WORDS: &[&str] = &[
    "a", "o", "e", "as", "os", "de", "da", "do", "para", "por", "no", "na", "em", "que", "como",
    "um", "uma",
];

/// Error raised when a JSON config override cannot be parsed.
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid config json: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Top-level configuration for stepnote core.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepnoteConfig {
    pub keywords: KeywordConfig,
    pub search: SearchConfig,
    pub storage: StorageConfig,
}

impl StepnoteConfig {
    /// Parses a JSON document, filling omitted fields with defaults.
    ///
    /// # Errors
    /// - `Parse` when the document is not valid JSON for this shape.
    /// - `Invalid` when a value breaks a contract (zero limits, empty slot key).
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.keywords.max_keywords == 0 {
            return Err(ConfigError::Invalid(
                "keywords.max_keywords must be > 0".to_string(),
            ));
        }
        if self.search.suggestion_limit == 0 {
            return Err(ConfigError::Invalid(
                "search.suggestion_limit must be > 0".to_string(),
            ));
        }
        if self.storage.slot_key.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "storage.slot_key cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Keyword extraction settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    /// Upper bound on keywords kept per page.
    pub max_keywords: usize,
    /// Minimum token length in chars.
    pub min_token_len: usize,
    /// Lower-cased words never emitted as keywords.
    pub stop_words: Vec<String>,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            max_keywords: DEFAULT_MAX_KEYWORDS,
            min_token_len: DEFAULT_MIN_TOKEN_LEN,
            stop_words: DEFAULT_STOP_WORDS
                .iter()
                .map(|word| (*word).to_string())
                .collect(),
        }
    }
}

impl KeywordConfig {
    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.iter().any(|word| word == token)
    }
}

/// Search/suggestion settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub suggestion_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }
}

/// Storage slot settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Key of the slot holding the JSON page array.
    pub slot_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            slot_key: DEFAULT_SLOT_KEY.to_string(),
        }
    }
}
