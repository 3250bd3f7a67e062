//! Memora Desktop — Dioxus-powered memory search.

use std::sync::{Arc, Mutex};

use dioxus::prelude::*;

mod app;
mod results;
mod search;
mod state;

use app::App;
use memora_core::SearchConfig;
use memora_http::HttpSearchClient;

/// Pre-runtime storage — built before Dioxus launches, consumed on first render.
pub static INITIAL_CLIENT: Mutex<Option<(Arc<HttpSearchClient>, SearchConfig)>> = Mutex::new(None);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("memora=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    let cwd = std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("."));
    let config = memora_core::load_config(&cwd);
    let client = match HttpSearchClient::new(&config) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!("Cannot start search client: {e}");
            std::process::exit(2);
        }
    };
    tracing::info!(endpoint = %client.endpoint(), "memora desktop starting");
    if let Ok(mut slot) = INITIAL_CLIENT.lock() {
        *slot = Some((client, config));
    }

    #[cfg(feature = "desktop")]
    {
        use dioxus::desktop::{Config, LogicalSize, WindowBuilder};

        LaunchBuilder::new()
            .with_cfg(
                Config::default()
                    .with_menu(None)
                    .with_background_color((10, 10, 10, 255))
                    .with_disable_context_menu(true)
                    .with_window(
                        WindowBuilder::new()
                            .with_title("Memora")
                            .with_inner_size(LogicalSize::new(1100.0, 800.0))
                            .with_min_inner_size(LogicalSize::new(640.0, 480.0))
                            .with_resizable(true)
                            .with_decorations(true),
                    ),
            )
            .launch(App);
    }

    #[cfg(not(feature = "desktop"))]
    {
        dioxus::launch(App);
    }
}
