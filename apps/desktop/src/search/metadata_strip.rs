//! Metadata strip showing result count and query time.

use dioxus::prelude::*;
use memora_core::View;

use crate::state::*;

#[component]
pub fn MetadataStrip() -> Element {
    let panel = PANEL.read();
    let summary = match panel.as_ref().map(|p| p.view()) {
        Some(View::Populated { cards, elapsed_ms }) => Some((cards.len(), elapsed_ms)),
        Some(View::Empty { elapsed_ms, .. }) => Some((0, elapsed_ms)),
        _ => None,
    };

    let Some((count, elapsed_ms)) = summary else {
        return rsx! {
            div { class: "metadata-strip hidden" }
        };
    };

    rsx! {
        div {
            class: "metadata-strip",
            span { class: "metadata-count", "{count} results" }
            span { class: "metadata-sep", "\u{00B7}" }
            span { class: "metadata-time", "{elapsed_ms:.1}ms" }
        }
    }
}
