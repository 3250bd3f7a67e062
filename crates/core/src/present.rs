//! Result presenter: picks one of five views from the query text and the current outcome.
//!
//! Pure function of its inputs. Cards keep backend order and carry scores untouched.

use serde::Serialize;

use crate::error::FailureCategory;
use crate::executor::SearchOutcome;
use crate::types::RankedResult;

/// Skeleton cards shown while loading, independent of the previous result count.
pub const SKELETON_CARDS: usize = 4;

/// Discriminant of [`View`], handy for tests and styling hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    Unstarted,
    Loading,
    Empty,
    Populated,
    Errored,
}

/// One result as handed to the memory card renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResultCard<'a> {
    /// 1-based position in the backend ranking.
    pub rank: usize,
    pub result: &'a RankedResult,
    pub score: Option<f64>,
    pub show_score: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View<'a> {
    Unstarted,
    Loading { placeholders: usize },
    Empty { query: &'a str, elapsed_ms: f64 },
    Populated { cards: Vec<ResultCard<'a>>, elapsed_ms: f64 },
    Errored {
        category: FailureCategory,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<&'a str>,
        detail: String,
    },
}

/// Map the panel snapshot to a view. `text` is the query the outcome answers.
///
/// An idle executor always reads as Unstarted, whether or not text has been typed:
/// typing alone never searches.
pub fn present<'a>(text: &'a str, outcome: &'a SearchOutcome) -> View<'a> {
    match outcome {
        SearchOutcome::Idle => View::Unstarted,
        SearchOutcome::Loading => View::Loading { placeholders: SKELETON_CARDS },
        SearchOutcome::Success { results, elapsed_ms } if results.is_empty() => {
            View::Empty { query: text, elapsed_ms: *elapsed_ms }
        }
        SearchOutcome::Success { results, elapsed_ms } => View::Populated {
            cards: results
                .iter()
                .enumerate()
                .map(|(i, result)| ResultCard {
                    rank: i + 1,
                    result,
                    score: result.score,
                    show_score: result.score.is_some(),
                })
                .collect(),
            elapsed_ms: *elapsed_ms,
        },
        SearchOutcome::Failure(err) => View::Errored {
            category: err.category(),
            message: err.backend_message(),
            detail: err.to_string(),
        },
    }
}

impl View<'_> {
    pub fn kind(&self) -> ViewKind {
        match self {
            View::Unstarted => ViewKind::Unstarted,
            View::Loading { .. } => ViewKind::Loading,
            View::Empty { .. } => ViewKind::Empty,
            View::Populated { .. } => ViewKind::Populated,
            View::Errored { .. } => ViewKind::Errored,
        }
    }

    /// Primary line of copy for the view. Distinct for every view and failure category.
    pub fn headline(&self) -> &'static str {
        match self {
            View::Unstarted => "Start exploring your memories",
            View::Loading { .. } => "Searching memories\u{2026}",
            View::Empty { .. } => "No memories found",
            View::Populated { .. } => "Results",
            View::Errored { category, .. } => match category {
                FailureCategory::Transport => "Couldn't reach the memory service",
                FailureCategory::Backend => "The memory service reported an error",
                FailureCategory::Malformed => "The memory service sent a response we couldn't read",
            },
        }
    }

    /// Secondary line, if the view has one.
    pub fn hint(&self) -> Option<String> {
        match self {
            View::Unstarted => Some("Type a question or keyword and press Enter.".to_string()),
            View::Empty { query, .. } => {
                Some(format!("Nothing matched \u{201c}{}\u{201d}. Try another mode or fewer filters.", query.trim()))
            }
            View::Errored { message: Some(message), .. } => Some((*message).to_string()),
            View::Errored { category: FailureCategory::Transport, .. } => {
                Some("Check your connection and try again.".to_string())
            }
            View::Errored { .. } => Some("Try again in a moment.".to_string()),
            View::Loading { .. } | View::Populated { .. } => None,
        }
    }
}
