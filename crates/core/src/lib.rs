//! Memora search core — the part of the Memora client that turns user intent into
//! search requests, sequences them against the search service, and decides what the
//! results area shows.
//!
//! # Modules
//!
//! - [`types`] — Search modes, the type vocabulary, ranked results
//! - [`query`] — Mutable query state owned by one panel
//! - [`compose`] — Pure query-state → request composition
//! - [`executor`] — Request/response state machine with last-submission-wins
//! - [`present`] — Pure outcome → view selection
//! - [`panel`] — A panel instance tying the above together, with change observers
//! - [`service`] — The `SearchService` seam implemented by transports
//! - [`config`] — `.memora.toml` and environment configuration
//! - [`error`] — Validation, submission, search, and config errors

pub mod compose;
pub mod config;
pub mod error;
pub mod executor;
pub mod panel;
pub mod present;
pub mod query;
pub mod service;
pub mod types;

pub use compose::{compose, compose_with_limit, SearchRequest, DEFAULT_LIMIT};
pub use config::{load_config, SearchConfig};
pub use error::{ConfigError, FailureCategory, SearchError, SubmitRejected, ValidationError};
pub use executor::{PendingSearch, Resolution, SearchExecutor, SearchOutcome};
pub use panel::{PanelEvent, SearchPanel};
pub use present::{present, ResultCard, View, ViewKind, SKELETON_CARDS};
pub use query::QueryState;
pub use service::SearchService;
pub use types::{RankedResult, ScoreBreakdown, SearchMode, SearchResponse, TimeWindow, TypeVocabulary};
