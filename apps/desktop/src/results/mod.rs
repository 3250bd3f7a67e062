//! Results area — renders whichever view the presenter picked.

mod memory_card;

use dioxus::prelude::*;
use memora_core::View;

use crate::state::*;
use memory_card::MemoryCard;

#[component]
pub fn ResultsArea() -> Element {
    let panel = PANEL.read();
    let Some(panel) = panel.as_ref() else {
        return rsx! { div { class: "results-area" } };
    };
    let view = panel.view();
    let headline = view.headline();
    let hint = view.hint();
    let active_idx = *ACTIVE_IDX.read();

    let body = match view {
        View::Unstarted => rsx! {
            div {
                class: "results-state unstarted",
                h2 { "{headline}" }
                if let Some(hint) = hint {
                    p { "{hint}" }
                }
            }
        },
        View::Loading { placeholders } => rsx! {
            div {
                class: "results-list loading",
                for i in 0..placeholders {
                    div {
                        key: "{i}",
                        class: "memory-card skeleton",
                        div { class: "skeleton-line title" }
                        div { class: "skeleton-line" }
                        div { class: "skeleton-line short" }
                    }
                }
            }
        },
        View::Empty { .. } => rsx! {
            div {
                class: "results-state empty",
                h2 { "{headline}" }
                if let Some(hint) = hint {
                    p { "{hint}" }
                }
            }
        },
        View::Errored { detail, .. } => rsx! {
            div {
                class: "results-state errored",
                h2 { "{headline}" }
                if let Some(hint) = hint {
                    p { "{hint}" }
                }
                details {
                    summary { "Details" }
                    code { "{detail}" }
                }
                button {
                    class: "retry-button",
                    onclick: move |_| retry_search(),
                    "Try again"
                }
            }
        },
        View::Populated { cards, .. } => rsx! {
            div {
                class: "results-list",
                for (i, card) in cards.into_iter().enumerate() {
                    MemoryCard {
                        key: "{card.result.id}",
                        rank: card.rank,
                        title: card
                            .result
                            .title()
                            .or_else(|| card.result.content())
                            .unwrap_or(&card.result.id)
                            .to_string(),
                        content: card.result.content().map(str::to_string),
                        memory_type: card.result.memory_type().map(str::to_string),
                        score: if card.show_score { card.score } else { None },
                        highlights: card.result.highlights.clone(),
                        active: i == active_idx,
                        onselect: move |_| *ACTIVE_IDX.write() = i,
                    }
                }
            }
        },
    };

    rsx! {
        div {
            class: "results-area",
            {body}
        }
    }
}
