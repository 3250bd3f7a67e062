//! Error types for the search core.
//!
//! Local contract violations ([`ValidationError`], [`SubmitRejected`]) never leave the
//! panel; [`SearchError`] is what a failed submission resolves to and what the
//! presenter renders.

use serde::Serialize;
use std::time::Duration;

/// A mutator received a value outside its contract. State is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("unknown search mode '{0}' (expected hybrid, semantic or keyword)")]
    UnknownMode(String),
    #[error("unknown memory type '{0}'")]
    UnknownType(String),
    #[error("unknown time window '{0}' (expected all, today, week, month, quarter or year)")]
    UnknownWindow(String),
}

/// Broad failure class. The presenter picks its copy from this, so the three must stay distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCategory {
    Transport,
    Backend,
    Malformed,
}

/// Why a search call did not produce a result set.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// The call never completed: connection refused, reset, or timed out.
    #[error("transport failure: {reason}")]
    Transport { reason: String, timed_out: bool },
    /// The backend answered and said no.
    #[error("backend error{}", describe_backend(.status, .message))]
    Backend {
        status: Option<u16>,
        message: Option<String>,
    },
    /// The backend answered with something that is not a result set.
    #[error("malformed response: {reason}")]
    Malformed { reason: String },
}

fn describe_backend(status: &Option<u16>, message: &Option<String>) -> String {
    let mut out = String::new();
    if let Some(status) = status {
        out.push_str(&format!(" ({status})"));
    }
    if let Some(message) = message {
        out.push_str(&format!(": {message}"));
    }
    out
}

impl SearchError {
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport { reason: reason.into(), timed_out: false }
    }

    pub fn timeout(after: Duration) -> Self {
        Self::Transport {
            reason: format!("no response within {}ms", after.as_millis()),
            timed_out: true,
        }
    }

    pub fn backend(status: Option<u16>, message: Option<String>) -> Self {
        Self::Backend { status, message }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed { reason: reason.into() }
    }

    pub fn category(&self) -> FailureCategory {
        match self {
            Self::Transport { .. } => FailureCategory::Transport,
            Self::Backend { .. } => FailureCategory::Backend,
            Self::Malformed { .. } => FailureCategory::Malformed,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport { timed_out: true, .. })
    }

    /// Human-readable reason supplied by the backend, if any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Backend { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// A submission was refused before any request was issued.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRejected {
    #[error("query text is empty")]
    EmptyQuery,
    #[error("query needs at least {min} characters, got {got}")]
    TooShort { min: usize, got: usize },
    #[error("no previous search to retry")]
    NothingToRetry,
}

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid config `{key}`: {message}")]
pub struct ConfigError {
    pub key: &'static str,
    pub message: String,
}

impl ConfigError {
    pub(crate) fn new(key: &'static str, message: impl Into<String>) -> Self {
        Self { key, message: message.into() }
    }
}
