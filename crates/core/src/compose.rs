//! Filter composer: turns a [`QueryState`] snapshot into a submittable [`SearchRequest`].

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use crate::query::QueryState;
use crate::types::{SearchMode, TimeWindow};

/// Result limit for the default configuration.
pub const DEFAULT_LIMIT: usize = 20;

/// Normalized request derived from a query state.
///
/// `types` is `None` when no filter is selected, never `Some(empty)`. When present it
/// follows vocabulary order, so the same selection always serializes the same way.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchRequest {
    pub query: String,
    pub mode: SearchMode,
    pub types: Option<Vec<String>>,
    pub window: TimeWindow,
    pub temporal_boost: bool,
    pub limit: usize,
}

/// Compose with the default limit.
pub fn compose(state: &QueryState) -> SearchRequest {
    compose_with_limit(state, DEFAULT_LIMIT)
}

/// Compose a request. Pure: equal states give equal requests.
pub fn compose_with_limit(state: &QueryState, limit: usize) -> SearchRequest {
    let types = if state.selected_types().is_empty() {
        None
    } else {
        Some(
            state
                .vocabulary()
                .iter()
                .filter(|tag| state.is_type_selected(tag))
                .map(str::to_string)
                .collect(),
        )
    };
    SearchRequest {
        query: state.text().to_string(),
        mode: state.mode(),
        types,
        window: state.window(),
        temporal_boost: state.temporal_boost(),
        limit,
    }
}

/// Serializes as the search API body. `memory_types` is left out entirely when unfiltered,
/// and `temporal_filter` when the window is `all`.
impl Serialize for SearchRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = 4 + usize::from(self.types.is_some()) + usize::from(self.window != TimeWindow::All);
        let mut body = serializer.serialize_struct("SearchRequest", len)?;
        body.serialize_field("query", &self.query)?;
        body.serialize_field("mode", self.mode.wire_name())?;
        body.serialize_field("limit", &self.limit)?;
        body.serialize_field("temporal_boost", &self.temporal_boost)?;
        match &self.types {
            Some(types) => body.serialize_field("memory_types", types)?,
            None => body.skip_field("memory_types")?,
        }
        if self.window == TimeWindow::All {
            body.skip_field("temporal_filter")?;
        } else {
            body.serialize_field("temporal_filter", self.window.as_str())?;
        }
        body.end()
    }
}
