//! Search bar — input field, filter controls, and metadata strip.

mod filters;
mod metadata_strip;
mod search_input;

use dioxus::prelude::*;
use filters::Filters;
use metadata_strip::MetadataStrip;
use search_input::SearchInput;

/// Search bar spanning the full width of the content area.
#[component]
pub fn SearchBar() -> Element {
    rsx! {
        div {
            class: "search-panel",
            SearchInput {}
            Filters {}
            MetadataStrip {}
        }
    }
}
