//! Core types shared across the Memora search core: search modes, the type-filter
//! vocabulary, ranked results with their score breakdown, and the raw search response.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

// ---------------------------------------------------------------------------
// Search mode
// ---------------------------------------------------------------------------

/// Strategy the backend uses to match the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Dense and sparse retrieval blended.
    #[default]
    Hybrid,
    /// Vector similarity only.
    Semantic,
    /// Lexical (BM25) only.
    Keyword,
}

impl SearchMode {
    pub const ALL: [SearchMode; 3] = [SearchMode::Hybrid, SearchMode::Semantic, SearchMode::Keyword];

    pub fn as_str(self) -> &'static str {
        match self {
            SearchMode::Hybrid => "hybrid",
            SearchMode::Semantic => "semantic",
            SearchMode::Keyword => "keyword",
        }
    }

    /// Name the search API expects in the request body.
    pub fn wire_name(self) -> &'static str {
        match self {
            SearchMode::Hybrid => "hybrid",
            SearchMode::Semantic => "dense",
            SearchMode::Keyword => "sparse",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SearchMode::Hybrid => "Hybrid",
            SearchMode::Semantic => "Semantic",
            SearchMode::Keyword => "Keyword",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = ValidationError;

    /// Accepts the display names and the wire names, case-insensitively. Anything else is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hybrid" => Ok(SearchMode::Hybrid),
            "semantic" | "dense" => Ok(SearchMode::Semantic),
            "keyword" | "sparse" => Ok(SearchMode::Keyword),
            _ => Err(ValidationError::UnknownMode(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Time window
// ---------------------------------------------------------------------------

/// Restricts results to memories created within a preset window, counted back from now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    #[default]
    All,
    Today,
    Week,
    Month,
    Quarter,
    Year,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 6] = [
        TimeWindow::All,
        TimeWindow::Today,
        TimeWindow::Week,
        TimeWindow::Month,
        TimeWindow::Quarter,
        TimeWindow::Year,
    ];

    /// Also the `temporal_filter` value the search API expects.
    pub fn as_str(self) -> &'static str {
        match self {
            TimeWindow::All => "all",
            TimeWindow::Today => "today",
            TimeWindow::Week => "week",
            TimeWindow::Month => "month",
            TimeWindow::Quarter => "quarter",
            TimeWindow::Year => "year",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeWindow::All => "Any time",
            TimeWindow::Today => "Today",
            TimeWindow::Week => "Past week",
            TimeWindow::Month => "Past month",
            TimeWindow::Quarter => "Past quarter",
            TimeWindow::Year => "Past year",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeWindow {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeWindow::ALL
            .into_iter()
            .find(|w| w.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::UnknownWindow(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Type vocabulary
// ---------------------------------------------------------------------------

/// Default filterable memory types, in chip display order.
pub const DEFAULT_TYPE_VOCABULARY: &[&str] = &[
    "insight",
    "decision",
    "action_item",
    "meeting_note",
    "research",
    "question",
    "feedback",
    "idea",
    "reference",
];

/// Fixed, ordered, duplicate-free list of type tags a query may filter on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TypeVocabulary {
    tags: Vec<String>,
}

impl TypeVocabulary {
    /// Build from tags, dropping repeats and keeping first-seen order.
    pub fn new<I, T>(tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for tag in tags {
            let tag = tag.into();
            if !out.contains(&tag) {
                out.push(tag);
            }
        }
        Self { tags: out }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl Default for TypeVocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_TYPE_VOCABULARY.iter().copied())
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Per-signal scores behind a result's final score. Any of them may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScoreBreakdown {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dense: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sparse: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporal: Option<f64>,
}

impl ScoreBreakdown {
    pub fn is_empty(&self) -> bool {
        self.dense.is_none() && self.sparse.is_none() && self.temporal.is_none()
    }
}

/// One matched memory. Position in the result sequence is the backend's rank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult {
    pub id: String,
    /// Opaque memory record, handed to the card renderer as-is.
    pub payload: serde_json::Value,
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "ScoreBreakdown::is_empty")]
    pub breakdown: ScoreBreakdown,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl RankedResult {
    pub fn new(id: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            payload,
            score: None,
            breakdown: ScoreBreakdown::default(),
            highlights: Vec::new(),
            explanation: None,
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    fn payload_str(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(|v| v.as_str())
    }

    pub fn title(&self) -> Option<&str> {
        self.payload_str("title")
    }

    pub fn content(&self) -> Option<&str> {
        self.payload_str("content")
    }

    pub fn memory_type(&self) -> Option<&str> {
        self.payload_str("memory_type")
    }
}

/// What a search service hands back for one request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchResponse {
    /// Backend order; never re-sorted downstream.
    pub results: Vec<RankedResult>,
    /// Server-reported time, when the server reports one.
    pub elapsed_ms: Option<f64>,
}

impl SearchResponse {
    pub fn new(results: Vec<RankedResult>) -> Self {
        Self { results, elapsed_ms: None }
    }

    pub fn with_elapsed_ms(mut self, elapsed_ms: f64) -> Self {
        self.elapsed_ms = Some(elapsed_ms);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_display_and_wire_names() {
        assert_eq!("hybrid".parse::<SearchMode>().unwrap(), SearchMode::Hybrid);
        assert_eq!("Semantic".parse::<SearchMode>().unwrap(), SearchMode::Semantic);
        assert_eq!("dense".parse::<SearchMode>().unwrap(), SearchMode::Semantic);
        assert_eq!("SPARSE".parse::<SearchMode>().unwrap(), SearchMode::Keyword);
    }

    #[test]
    fn mode_rejects_unknown_values() {
        let err = "fuzzy".parse::<SearchMode>().unwrap_err();
        assert_eq!(err, ValidationError::UnknownMode("fuzzy".into()));
        assert!(" hybrid".parse::<SearchMode>().is_err());
    }

    #[test]
    fn window_parses_api_names_only() {
        assert_eq!("week".parse::<TimeWindow>().unwrap(), TimeWindow::Week);
        assert_eq!("Quarter".parse::<TimeWindow>().unwrap(), TimeWindow::Quarter);
        assert_eq!(
            "custom".parse::<TimeWindow>().unwrap_err(),
            ValidationError::UnknownWindow("custom".into())
        );
        assert_eq!(TimeWindow::default(), TimeWindow::All);
    }

    #[test]
    fn default_mode_is_hybrid() {
        assert_eq!(SearchMode::default(), SearchMode::Hybrid);
    }

    #[test]
    fn vocabulary_dedups_and_keeps_order() {
        let vocab = TypeVocabulary::new(["idea", "insight", "idea"]);
        assert_eq!(vocab.iter().collect::<Vec<_>>(), vec!["idea", "insight"]);
        assert!(vocab.contains("insight"));
        assert!(!vocab.contains("Insight"));
    }

    #[test]
    fn default_vocabulary_has_nine_tags() {
        let vocab = TypeVocabulary::default();
        assert_eq!(vocab.len(), 9);
        assert!(vocab.contains("action_item"));
    }

    #[test]
    fn payload_accessors_read_memory_fields() {
        let r = RankedResult::new(
            "m1",
            serde_json::json!({ "title": "Roadmap", "content": "Q3 plan", "memory_type": "decision" }),
        )
        .with_score(0.5);
        assert_eq!(r.title(), Some("Roadmap"));
        assert_eq!(r.content(), Some("Q3 plan"));
        assert_eq!(r.memory_type(), Some("decision"));
        assert_eq!(r.score, Some(0.5));
    }
}
