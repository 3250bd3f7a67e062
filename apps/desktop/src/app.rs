//! Root application component — search bar over the results area.

use dioxus::prelude::*;
use memora_core::{PanelEvent, SearchPanel};

use crate::results::ResultsArea;
use crate::search::SearchBar;
use crate::state::*;
use crate::INITIAL_CLIENT;

static VARIABLES_CSS: Asset = asset!("/assets/styles/variables.css");
static APP_CSS: Asset = asset!("/assets/styles/app.css");

#[component]
pub fn App() -> Element {
    use_hook(|| {
        let initial = INITIAL_CLIENT.lock().ok().and_then(|mut slot| slot.take());
        if let Some((client, config)) = initial {
            let mut panel = SearchPanel::new(client, &config);
            panel.subscribe(|event| {
                if event == PanelEvent::OutcomeChanged {
                    tracing::debug!("search outcome changed");
                }
            });
            *PANEL.write() = Some(panel);
        }
    });

    rsx! {
        document::Stylesheet { href: VARIABLES_CSS }
        document::Stylesheet { href: APP_CSS }

        div {
            class: "app-shell",

            div {
                class: "titlebar",
                span { class: "titlebar-title", "Memora" }
            }

            div {
                class: "content-area",
                SearchBar {}
                ResultsArea {}
            }

            StatusBar {}
        }
    }
}

/// Status bar at the bottom of the app
#[component]
fn StatusBar() -> Element {
    let panel = PANEL.read();
    let Some(panel) = panel.as_ref() else {
        return rsx! {
            div { class: "statusbar", span { "not connected" } }
        };
    };
    let query = panel.query();
    let selected = query.selected_types().len();

    rsx! {
        div {
            class: "statusbar",
            span { class: "statusbar-mode", "{query.mode().label()}" }
            span { class: "statusbar-sep", "|" }
            span { class: "statusbar-filters", "{selected} type filters" }
            span { class: "statusbar-sep", "|" }
            span {
                class: "statusbar-boost",
                if query.temporal_boost() { "recency boost on" } else { "recency boost off" }
            }
        }
    }
}
