//! Search executor: the request/response state machine.
//!
//! Every issued request is tagged with a generation number. A [`Resolution`] is only
//! applied if its generation is still the latest one, so a slow response to an older
//! submission can never overwrite the outcome of a newer one.
//!
//! The executor never awaits anything itself. [`SearchExecutor::submit`] returns a
//! [`PendingSearch`] that the host drives on whatever runtime it has, then hands the
//! finished [`Resolution`] back to [`SearchExecutor::resolve`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::compose::{compose_with_limit, SearchRequest};
use crate::config::SearchConfig;
use crate::error::{SearchError, SubmitRejected};
use crate::query::QueryState;
use crate::service::SearchService;
use crate::types::{RankedResult, SearchResponse};

/// Exactly one of these holds at any time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchOutcome {
    #[default]
    Idle,
    Loading,
    Success {
        results: Vec<RankedResult>,
        elapsed_ms: f64,
    },
    Failure(SearchError),
}

impl SearchOutcome {
    pub fn is_loading(&self) -> bool {
        matches!(self, SearchOutcome::Loading)
    }

    pub fn results(&self) -> &[RankedResult] {
        match self {
            SearchOutcome::Success { results, .. } => results,
            _ => &[],
        }
    }
}

/// A finished request, tagged with the generation it was issued under.
#[derive(Debug)]
pub struct Resolution {
    generation: u64,
    result: Result<SearchResponse, SearchError>,
    measured_ms: f64,
}

impl Resolution {
    pub fn new(generation: u64, result: Result<SearchResponse, SearchError>, measured_ms: f64) -> Self {
        Self { generation, result, measured_ms }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn result(&self) -> &Result<SearchResponse, SearchError> {
        &self.result
    }
}

/// An issued request that has not been awaited yet. Holds no borrow of the executor.
pub struct PendingSearch<S: ?Sized> {
    generation: u64,
    request: SearchRequest,
    service: Arc<S>,
    timeout: Duration,
}

impl<S: SearchService + ?Sized> PendingSearch<S> {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn request(&self) -> &SearchRequest {
        &self.request
    }

    /// Perform the call, bounded by the configured timeout.
    pub async fn run(self) -> Resolution {
        let started = Instant::now();
        let result = match tokio::time::timeout(self.timeout, self.service.search(&self.request)).await
        {
            Ok(result) => result,
            Err(_) => Err(SearchError::timeout(self.timeout)),
        };
        let measured_ms = started.elapsed().as_secs_f64() * 1000.0;
        Resolution::new(self.generation, result, measured_ms)
    }
}

/// Owns the [`SearchOutcome`] and the record of what was last asked.
pub struct SearchExecutor<S: ?Sized> {
    service: Arc<S>,
    outcome: SearchOutcome,
    generation: u64,
    last_request: Option<SearchRequest>,
    limit: usize,
    timeout: Duration,
    min_query_chars: usize,
}

impl<S: SearchService + ?Sized> SearchExecutor<S> {
    pub fn new(service: Arc<S>, config: &SearchConfig) -> Self {
        Self {
            service,
            outcome: SearchOutcome::Idle,
            generation: 0,
            last_request: None,
            limit: config.limit,
            timeout: Duration::from_millis(config.request_timeout_ms),
            min_query_chars: config.min_query_chars.max(1),
        }
    }

    pub fn outcome(&self) -> &SearchOutcome {
        &self.outcome
    }

    /// The most recently issued request, successful or not.
    pub fn last_request(&self) -> Option<&SearchRequest> {
        self.last_request.as_ref()
    }

    /// Generation of the newest request (or reset). Only resolutions carrying it are applied.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Accept a new submission for `state`, superseding anything in flight.
    ///
    /// Whitespace-only text counts as empty and issues nothing.
    pub fn submit(&mut self, state: &QueryState) -> Result<PendingSearch<S>, SubmitRejected> {
        let meaningful = state.text().trim().chars().count();
        if meaningful == 0 {
            debug!("Ignoring submission with empty query");
            return Err(SubmitRejected::EmptyQuery);
        }
        if meaningful < self.min_query_chars {
            return Err(SubmitRejected::TooShort { min: self.min_query_chars, got: meaningful });
        }
        let request = compose_with_limit(state, self.limit);
        Ok(self.issue(request))
    }

    /// Re-issue the last request unchanged. No backoff, no automatic retries.
    pub fn retry(&mut self) -> Result<PendingSearch<S>, SubmitRejected> {
        let request = self.last_request.clone().ok_or(SubmitRejected::NothingToRetry)?;
        Ok(self.issue(request))
    }

    fn issue(&mut self, request: SearchRequest) -> PendingSearch<S> {
        if self.outcome.is_loading() {
            debug!(superseded = self.generation, "Superseding in-flight search");
        }
        self.generation += 1;
        self.outcome = SearchOutcome::Loading;
        self.last_request = Some(request.clone());
        debug!(
            generation = self.generation,
            query = request.query.as_str(),
            mode = request.mode.as_str(),
            "Issuing search"
        );
        PendingSearch {
            generation: self.generation,
            request,
            service: Arc::clone(&self.service),
            timeout: self.timeout,
        }
    }

    /// Apply a finished request. Returns false if it was stale and got dropped.
    pub fn resolve(&mut self, resolution: Resolution) -> bool {
        if resolution.generation != self.generation || !self.outcome.is_loading() {
            warn!(
                stale = resolution.generation,
                current = self.generation,
                "Dropping stale search resolution"
            );
            return false;
        }
        self.outcome = match resolution.result {
            Ok(response) => {
                let elapsed_ms = response.elapsed_ms.unwrap_or(resolution.measured_ms);
                debug!(
                    generation = resolution.generation,
                    results = response.results.len(),
                    elapsed_ms,
                    "Search resolved"
                );
                SearchOutcome::Success { results: response.results, elapsed_ms }
            }
            Err(err) => {
                warn!(generation = resolution.generation, category = ?err.category(), "Search failed: {err}");
                SearchOutcome::Failure(err)
            }
        };
        true
    }

    /// Back to Idle. Anything still in flight will be dropped when it lands.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.outcome = SearchOutcome::Idle;
    }
}
