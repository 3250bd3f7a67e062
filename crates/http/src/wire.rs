//! Decoding of the search API's JSON bodies.
//!
//! Anything that doesn't look like a result set is reported as malformed. It is never
//! turned into an empty success, which would read as "no memories found".

use memora_core::{RankedResult, ScoreBreakdown, SearchError, SearchResponse};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
struct WireResponse {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default)]
    results: Option<Vec<WireResult>>,
    #[serde(default)]
    took_ms: Option<f64>,
    #[serde(default)]
    message: Option<String>,
}

fn default_success() -> bool {
    true
}

#[derive(Deserialize)]
struct WireResult {
    memory: Value,
    #[serde(default)]
    score: Option<f64>,
    #[serde(default)]
    dense_score: Option<f64>,
    #[serde(default)]
    sparse_score: Option<f64>,
    #[serde(default)]
    temporal_score: Option<f64>,
    #[serde(default)]
    highlights: Vec<String>,
    #[serde(default)]
    explanation: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Value,
}

/// Decode a 2xx search body.
pub fn decode_search_response(body: &[u8]) -> Result<SearchResponse, SearchError> {
    let wire: WireResponse = serde_json::from_slice(body)
        .map_err(|e| SearchError::malformed(format!("invalid search response: {e}")))?;

    if !wire.success {
        return Err(SearchError::backend(None, wire.message));
    }
    let results = wire.results.ok_or_else(|| SearchError::malformed("response has no results array"))?;

    let mut out = Vec::with_capacity(results.len());
    for (position, item) in results.into_iter().enumerate() {
        out.push(decode_result(position, item)?);
    }

    Ok(SearchResponse { results: out, elapsed_ms: wire.took_ms })
}

fn decode_result(position: usize, item: WireResult) -> Result<RankedResult, SearchError> {
    if !item.memory.is_object() {
        return Err(SearchError::malformed(format!("result {position}: memory is not an object")));
    }
    let id = match item.memory.get("id") {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return Err(SearchError::malformed(format!("result {position}: memory has no id"))),
    };

    Ok(RankedResult {
        id,
        payload: item.memory,
        score: item.score,
        breakdown: ScoreBreakdown {
            dense: item.dense_score,
            sparse: item.sparse_score,
            temporal: item.temporal_score,
        },
        highlights: item.highlights,
        explanation: item.explanation,
    })
}

/// Pull a readable message out of an error body (`{"detail": ...}`), if there is one.
pub fn error_detail(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    match parsed.detail {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}
