//! A single memory result.

use dioxus::prelude::*;

/// Content preview length in characters.
const PREVIEW_CHARS: usize = 240;

#[component]
pub fn MemoryCard(
    rank: usize,
    title: String,
    content: Option<String>,
    memory_type: Option<String>,
    score: Option<f64>,
    highlights: Vec<String>,
    active: bool,
    onselect: EventHandler<()>,
) -> Element {
    let preview = content.map(|c| {
        if c.chars().count() > PREVIEW_CHARS {
            let cut: String = c.chars().take(PREVIEW_CHARS).collect();
            format!("{cut}\u{2026}")
        } else {
            c
        }
    });

    rsx! {
        div {
            class: if active { "memory-card active" } else { "memory-card" },
            onclick: move |_| onselect.call(()),

            div {
                class: "memory-card-header",
                span { class: "memory-rank", "{rank}" }
                span { class: "memory-title", "{title}" }
                if let Some(kind) = memory_type {
                    span { class: "memory-type", "{kind}" }
                }
                if let Some(score) = score {
                    span { class: "memory-score", "{score:.2}" }
                }
            }

            if let Some(preview) = preview {
                p { class: "memory-preview", "{preview}" }
            }

            for (i, highlight) in highlights.iter().enumerate() {
                div { key: "{i}", class: "memory-highlight", "{highlight}" }
            }
        }
    }
}
