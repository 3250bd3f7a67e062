//! Filter composer controls: mode selector, type chips, time window, recency toggle.
//!
//! None of these search on their own. They edit the query and wait for the next submission.

use dioxus::prelude::*;
use memora_core::{SearchMode, TimeWindow};

use crate::state::*;

#[component]
pub fn Filters() -> Element {
    let panel = PANEL.read();
    let Some(panel) = panel.as_ref() else {
        return rsx! { div { class: "filters hidden" } };
    };
    let query = panel.query();
    let current_mode = query.mode();
    let boost = query.temporal_boost();
    let current_window = query.window();
    let chips: Vec<(String, bool)> = query
        .vocabulary()
        .iter()
        .map(|tag| (tag.to_string(), query.is_type_selected(tag)))
        .collect();
    let any_selected = chips.iter().any(|(_, on)| *on) || current_window != TimeWindow::All;

    rsx! {
        div {
            class: "filters",

            div {
                class: "mode-selector",
                for mode in SearchMode::ALL {
                    button {
                        key: "{mode}",
                        class: if mode == current_mode { "mode-option active" } else { "mode-option" },
                        onclick: move |_| {
                            with_panel(|p| p.set_mode(mode));
                        },
                        "{mode.label()}"
                    }
                }
            }

            div {
                class: "type-chips",
                for (tag, selected) in chips {
                    button {
                        key: "{tag}",
                        class: if selected { "type-chip selected" } else { "type-chip" },
                        onclick: {
                            let tag = tag.clone();
                            move |_| {
                                if let Some(Err(e)) = with_panel(|p| p.toggle_type(&tag)) {
                                    tracing::warn!("{e}");
                                }
                            }
                        },
                        "{tag}"
                    }
                }
                if any_selected {
                    button {
                        class: "type-chips-clear",
                        onclick: move |_| {
                            with_panel(|p| p.clear_filters());
                        },
                        "Clear filters"
                    }
                }
            }

            select {
                class: "window-selector",
                value: "{current_window}",
                onchange: move |e: Event<FormData>| {
                    if let Some(Err(err)) = with_panel(|p| p.set_window_str(&e.value())) {
                        tracing::warn!("{err}");
                    }
                },
                for window in TimeWindow::ALL {
                    option {
                        key: "{window}",
                        value: "{window}",
                        selected: window == current_window,
                        "{window.label()}"
                    }
                }
            }

            label {
                class: "boost-toggle",
                input {
                    r#type: "checkbox",
                    checked: boost,
                    onchange: move |e: Event<FormData>| {
                        let enabled = e.checked();
                        with_panel(|p| p.set_temporal_boost(enabled));
                    },
                }
                span { "Favor recent memories" }
            }
        }
    }
}
