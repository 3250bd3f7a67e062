//! Test harness for search flow tests.
//!
//! `ScriptedService` hands each call a reply channel registered ahead of time, so a
//! test decides exactly when, and in which order, responses arrive.

use async_trait::async_trait;
use memora_core::{RankedResult, SearchError, SearchRequest, SearchResponse, SearchService};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

pub type Reply = Result<SearchResponse, SearchError>;

#[derive(Default)]
pub struct ScriptedService {
    replies: Mutex<HashMap<String, VecDeque<oneshot::Receiver<Reply>>>>,
    calls: Mutex<Vec<SearchRequest>>,
}

impl ScriptedService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register the next reply for `query`. Send on the returned channel to resolve the call.
    pub fn expect(&self, query: &str) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.replies.lock().unwrap().entry(query.to_string()).or_default().push_back(rx);
        tx
    }

    /// Register a reply that is already available.
    pub fn answer(&self, query: &str, reply: Reply) {
        let tx = self.expect(query);
        let _ = tx.send(reply);
    }

    pub fn calls(&self) -> Vec<SearchRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchService for ScriptedService {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        self.calls.lock().unwrap().push(request.clone());
        let rx = self.replies.lock().unwrap().get_mut(&request.query).and_then(VecDeque::pop_front);
        match rx {
            Some(rx) => rx.await.unwrap_or_else(|_| Err(SearchError::transport("reply dropped"))),
            None => Err(SearchError::transport(format!("no scripted reply for '{}'", request.query))),
        }
    }
}

/// Build a response with one result per score, ids `m0`, `m1`, ...
pub fn scored(scores: &[f64]) -> Reply {
    let results = scores
        .iter()
        .enumerate()
        .map(|(i, s)| {
            RankedResult::new(format!("m{i}"), serde_json::json!({ "id": format!("m{i}") })).with_score(*s)
        })
        .collect();
    Ok(SearchResponse::new(results))
}
