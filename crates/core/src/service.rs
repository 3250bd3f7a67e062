//! The one external call the core depends on.

use async_trait::async_trait;
use std::sync::Arc;

use crate::compose::SearchRequest;
use crate::error::SearchError;
use crate::types::SearchResponse;

/// Remote search over the memory store.
///
/// Calls are idempotent and may resolve in any order; callers enforce ordering.
/// Implementations must keep result order as the backend ranked it.
#[async_trait]
pub trait SearchService: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError>;
}

#[async_trait]
impl<T: SearchService + ?Sized> SearchService for Arc<T> {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        (**self).search(request).await
    }
}
