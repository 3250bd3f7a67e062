//! Mutable query record owned by one search panel.
//!
//! Mutators are synchronous and side-effect free. Nothing here talks to the network;
//! a search only happens when the panel submits.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::error::ValidationError;
use crate::types::{SearchMode, TimeWindow, TypeVocabulary};

/// Current text, mode, type filters, time window, and recency-boost flag.
///
/// `selected_types` is always a subset of the vocabulary the state was created with.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    text: String,
    mode: SearchMode,
    selected_types: BTreeSet<String>,
    window: TimeWindow,
    temporal_boost: bool,
    vocabulary: Arc<TypeVocabulary>,
}

impl QueryState {
    /// Fresh state: empty text, hybrid mode, no type or time filter, recency boost on.
    pub fn new(vocabulary: Arc<TypeVocabulary>) -> Self {
        Self {
            text: String::new(),
            mode: SearchMode::default(),
            selected_types: BTreeSet::new(),
            window: TimeWindow::All,
            temporal_boost: true,
            vocabulary,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn selected_types(&self) -> &BTreeSet<String> {
        &self.selected_types
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    pub fn temporal_boost(&self) -> bool {
        self.temporal_boost
    }

    pub fn vocabulary(&self) -> &TypeVocabulary {
        &self.vocabulary
    }

    pub fn is_type_selected(&self, tag: &str) -> bool {
        self.selected_types.contains(tag)
    }

    /// Replace the text verbatim. Empty is allowed; it just can't be submitted.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_mode(&mut self, mode: SearchMode) {
        self.mode = mode;
    }

    /// Set the mode from its name. Unknown names leave the state untouched.
    pub fn set_mode_str(&mut self, mode: &str) -> Result<(), ValidationError> {
        self.mode = mode.parse()?;
        Ok(())
    }

    /// Add `tag` if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle_type(&mut self, tag: &str) -> Result<bool, ValidationError> {
        if !self.vocabulary.contains(tag) {
            return Err(ValidationError::UnknownType(tag.to_string()));
        }
        if self.selected_types.remove(tag) {
            Ok(false)
        } else {
            self.selected_types.insert(tag.to_string());
            Ok(true)
        }
    }

    pub fn set_window(&mut self, window: TimeWindow) {
        self.window = window;
    }

    pub fn set_window_str(&mut self, window: &str) -> Result<(), ValidationError> {
        self.window = window.parse()?;
        Ok(())
    }

    pub fn set_temporal_boost(&mut self, enabled: bool) {
        self.temporal_boost = enabled;
    }

    /// Drop type and time filters and restore the recency boost. Text and mode stay.
    pub fn clear_filters(&mut self) {
        self.selected_types.clear();
        self.window = TimeWindow::All;
        self.temporal_boost = true;
    }
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new(Arc::new(TypeVocabulary::default()))
    }
}
