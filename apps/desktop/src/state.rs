//! Global application state using Dioxus signals.

use dioxus::prelude::*;
use memora_core::{PendingSearch, SearchPanel};
use memora_http::HttpSearchClient;

pub type Panel = SearchPanel<HttpSearchClient>;

// ---------------------------------------------------------------------------
// Global signals
// ---------------------------------------------------------------------------

/// The one search panel of this window — installed on first render.
pub static PANEL: GlobalSignal<Option<Panel>> = Signal::global(|| None);

/// Index of the currently highlighted card
pub static ACTIVE_IDX: GlobalSignal<usize> = Signal::global(|| 0);

// ---------------------------------------------------------------------------
// Panel access
// ---------------------------------------------------------------------------

/// Mutate the panel if it has been installed. Every write re-renders readers of `PANEL`.
pub fn with_panel<R>(f: impl FnOnce(&mut Panel) -> R) -> Option<R> {
    let mut guard = PANEL.write();
    guard.as_mut().map(f)
}

/// Explicit submission from Enter or the submit control.
pub fn submit_search() {
    match with_panel(|p| p.submit()) {
        Some(Ok(pending)) => {
            *ACTIVE_IDX.write() = 0;
            drive(pending);
        }
        Some(Err(rejected)) => tracing::debug!("submission ignored: {rejected}"),
        None => {}
    }
}

/// Re-issue the last request after a failure.
pub fn retry_search() {
    match with_panel(|p| p.retry()) {
        Some(Ok(pending)) => drive(pending),
        Some(Err(rejected)) => tracing::debug!("retry ignored: {rejected}"),
        None => {}
    }
}

/// Run the request off the UI path; the panel drops it if a newer one took over.
fn drive(pending: PendingSearch<HttpSearchClient>) {
    spawn(async move {
        let resolution = pending.run().await;
        with_panel(|p| p.resolve(resolution));
    });
}
