//! Search configuration: defaults, `.memora.toml` loading, and environment overrides.

use serde::Serialize;
use std::path::Path;
use tracing::{debug, warn};

use crate::compose::DEFAULT_LIMIT;
use crate::error::ConfigError;
use crate::types::TypeVocabulary;

/// File name looked up in the config directory.
pub const CONFIG_FILE_NAME: &str = ".memora.toml";

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Ceiling on how long a search may stay in Loading.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 15_000;

/// The search API refuses limits above this.
pub const MAX_LIMIT: usize = 100;

/// Known keys in `.memora.toml` for config validation.
const KNOWN_CONFIG_KEYS: &[&str] =
    &["api_url", "api_token", "limit", "request_timeout_ms", "min_query_chars", "type_vocabulary"];

/// Runtime configuration for the search core and its clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchConfig {
    /// Base URL of the Memora API, without the `/api/v1` suffix.
    pub api_url: String,
    #[serde(skip_serializing)]
    pub api_token: Option<String>,
    pub limit: usize,
    pub request_timeout_ms: u64,
    /// Minimum non-whitespace characters before a submission is accepted.
    pub min_query_chars: usize,
    pub type_vocabulary: TypeVocabulary,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            limit: DEFAULT_LIMIT,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            min_query_chars: 1,
            type_vocabulary: TypeVocabulary::default(),
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::new("api_url", "must not be empty"));
        }
        if self.limit == 0 || self.limit > MAX_LIMIT {
            return Err(ConfigError::new("limit", format!("must be between 1 and {MAX_LIMIT}")));
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::new("request_timeout_ms", "must be greater than zero"));
        }
        if self.min_query_chars == 0 {
            return Err(ConfigError::new("min_query_chars", "must be at least 1"));
        }
        if self.type_vocabulary.is_empty() {
            return Err(ConfigError::new("type_vocabulary", "must list at least one type"));
        }
        if self.type_vocabulary.iter().any(|t| t.trim().is_empty()) {
            return Err(ConfigError::new("type_vocabulary", "types must not be blank"));
        }
        Ok(())
    }
}

/// Simple Levenshtein edit distance for typo suggestions.
fn edit_distance(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

fn warn_unknown_key(key: &str) {
    let Some(suggestion) = KNOWN_CONFIG_KEYS.iter().min_by_key(|k| edit_distance(key, k)) else {
        return;
    };
    if edit_distance(key, suggestion) <= 3 {
        warn!(
            key,
            suggestion = *suggestion,
            "Unknown key in {CONFIG_FILE_NAME} — did you mean '{suggestion}'?"
        );
    } else {
        warn!(key, "Unknown key in {CONFIG_FILE_NAME} (known keys: {})", KNOWN_CONFIG_KEYS.join(", "));
    }
}

fn positive_int(table: &toml::Table, key: &str) -> Option<u64> {
    let value = table.get(key)?;
    match value.as_integer() {
        Some(n) if n > 0 => Some(n as u64),
        _ => {
            warn!(key, "Ignoring {key} in {CONFIG_FILE_NAME}: expected a positive integer");
            None
        }
    }
}

fn string_value(table: &toml::Table, key: &str) -> Option<String> {
    let value = table.get(key)?;
    match value.as_str() {
        Some(s) => Some(s.to_string()),
        None => {
            warn!(key, "Ignoring {key} in {CONFIG_FILE_NAME}: expected a string");
            None
        }
    }
}

/// Merge the contents of a `.memora.toml` file over `config`.
///
/// Unknown keys and values of the wrong type are reported and skipped.
pub fn apply_config_toml(config: &mut SearchConfig, content: &str) -> Result<(), toml::de::Error> {
    let table = content.parse::<toml::Table>()?;

    for key in table.keys() {
        if !KNOWN_CONFIG_KEYS.contains(&key.as_str()) {
            warn_unknown_key(key);
        }
    }

    if let Some(url) = string_value(&table, "api_url") {
        config.api_url = url.trim_end_matches('/').to_string();
    }
    if let Some(token) = string_value(&table, "api_token") {
        config.api_token = Some(token);
    }
    if let Some(limit) = positive_int(&table, "limit") {
        config.limit = limit as usize;
    }
    if let Some(ms) = positive_int(&table, "request_timeout_ms") {
        config.request_timeout_ms = ms;
    }
    if let Some(min) = positive_int(&table, "min_query_chars") {
        config.min_query_chars = min as usize;
    }
    if let Some(value) = table.get("type_vocabulary") {
        match value.as_array() {
            Some(tags) => {
                let tags: Vec<String> =
                    tags.iter().filter_map(|v| v.as_str().map(|s| s.to_string())).collect();
                let vocabulary = TypeVocabulary::new(tags.iter().cloned());
                if vocabulary.len() != tags.len() {
                    warn!("Duplicate or non-string entries in type_vocabulary were dropped");
                }
                config.type_vocabulary = vocabulary;
            }
            None => warn!("Ignoring type_vocabulary in {CONFIG_FILE_NAME}: expected an array"),
        }
    }
    Ok(())
}

/// Apply `MEMORA_*` overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(config: &mut SearchConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("MEMORA_API_URL").filter(|u| !u.trim().is_empty()) {
        config.api_url = url.trim_end_matches('/').to_string();
    }
    if let Some(token) = lookup("MEMORA_API_TOKEN").filter(|t| !t.is_empty()) {
        config.api_token = Some(token);
    }
    if let Some(raw) = lookup("MEMORA_TIMEOUT_MS") {
        match raw.trim().parse::<u64>() {
            Ok(ms) if ms > 0 => config.request_timeout_ms = ms,
            _ => warn!(value = raw.as_str(), "Ignoring MEMORA_TIMEOUT_MS: expected a positive integer"),
        }
    }
}

/// Load configuration from `.memora.toml` in `dir`, then apply environment overrides.
///
/// A missing file yields defaults. A file that fails to parse yields defaults with a warning.
pub fn load_config(dir: &Path) -> SearchConfig {
    let mut config = SearchConfig::default();
    let path = dir.join(CONFIG_FILE_NAME);

    if path.exists() {
        debug!(path = %path.display(), "Loading {CONFIG_FILE_NAME}");
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let mut parsed = config.clone();
                match apply_config_toml(&mut parsed, &content) {
                    Ok(()) => config = parsed,
                    Err(e) => warn!("Failed to parse {CONFIG_FILE_NAME}: {e}"),
                }
            }
            Err(e) => warn!("Failed to read {CONFIG_FILE_NAME}: {e}"),
        }
    }

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    config
}
