//! HTTP transport for Memora search.
//!
//! [`HttpSearchClient`] implements [`SearchService`] against `POST {api_url}/api/v1/search`.
//! Connection problems and timeouts map to transport failures, non-2xx statuses and
//! `success: false` bodies to backend errors, and undecodable bodies to malformed responses.

pub mod wire;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, AUTHORIZATION};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use memora_core::{ConfigError, SearchConfig, SearchError, SearchRequest, SearchResponse, SearchService};

pub use wire::{decode_search_response, error_detail};

/// Path of the search endpoint relative to the API base URL.
pub const SEARCH_PATH: &str = "/api/v1/search";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error(transparent)]
    InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub struct HttpSearchClient {
    client: Client,
    endpoint: String,
}

impl HttpSearchClient {
    pub fn new(config: &SearchConfig) -> Result<Self, ClientError> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        if let Some(token) = &config.api_token {
            headers.insert(AUTHORIZATION, format!("Bearer {token}").parse()?);
        }
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}{SEARCH_PATH}", config.api_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn transport_error(e: reqwest::Error) -> SearchError {
    SearchError::Transport { reason: e.to_string(), timed_out: e.is_timeout() }
}

#[async_trait]
impl SearchService for HttpSearchClient {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        debug!(endpoint = self.endpoint.as_str(), query = request.query.as_str(), "POST search");
        let res = self.client.post(&self.endpoint).json(request).send().await.map_err(transport_error)?;

        let status = res.status();
        let body = res.bytes().await.map_err(transport_error)?;
        if !status.is_success() {
            return Err(SearchError::backend(Some(status.as_u16()), error_detail(&body)));
        }
        decode_search_response(&body)
    }
}
