//! Hero search input. Typing edits the query; only Enter or the submit button searches.

use dioxus::prelude::*;

use crate::state::*;

#[component]
pub fn SearchInput() -> Element {
    let panel = PANEL.read();
    let query = panel.as_ref().map(|p| p.query().text().to_string()).unwrap_or_default();
    let loading = panel.as_ref().is_some_and(|p| p.outcome().is_loading());
    drop(panel);
    let has_query = !query.trim().is_empty();

    rsx! {
        div {
            class: if has_query { "search-field has-query" } else { "search-field" },

            span { class: "search-label", "SEARCH" }

            div {
                class: "search-input-row",

                svg {
                    class: "search-icon",
                    width: "16",
                    height: "16",
                    view_box: "0 0 24 24",
                    fill: "none",
                    stroke: "currentColor",
                    stroke_width: "2",
                    circle { cx: "11", cy: "11", r: "8" }
                    line { x1: "21", y1: "21", x2: "16.65", y2: "16.65" }
                }

                input {
                    class: "search-input",
                    r#type: "text",
                    placeholder: "Ask your memories\u{2026}",
                    value: "{query}",
                    autofocus: true,
                    oninput: move |e: Event<FormData>| {
                        let value = e.value();
                        with_panel(|p| p.set_text(value));
                    },
                    onkeydown: move |e: KeyboardEvent| {
                        if e.key() == Key::Enter {
                            submit_search();
                        }
                    },
                }

                if has_query {
                    button {
                        class: "search-clear",
                        onclick: move |_| {
                            with_panel(|p| p.clear());
                            *ACTIVE_IDX.write() = 0;
                        },
                        "\u{00D7}"
                    }
                }

                button {
                    class: "search-submit",
                    disabled: !has_query,
                    onclick: move |_| submit_search(),
                    if loading { "Searching\u{2026}" } else { "Search" }
                }
            }
        }
    }
}
