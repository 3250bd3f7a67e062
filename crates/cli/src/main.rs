//! Memora CLI — search your memories from the terminal.
//!
//! Drives the same `SearchPanel` the desktop app uses: flags go through the panel's
//! mutators, one submission is issued, and the resulting view is printed.

mod render;

use clap::{Parser, Subcommand};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use memora_core::{load_config, SearchConfig, SearchPanel, ViewKind};
use memora_http::HttpSearchClient;

/// Memora CLI — search your memory knowledge base.
#[derive(Parser)]
#[command(name = "mem", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON instead of human-readable text
    #[arg(long, global = true)]
    json: bool,

    /// Directory holding .memora.toml (default: current directory)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search memories
    Search {
        /// Search query
        query: String,

        /// Search mode: hybrid, semantic or keyword
        #[arg(long)]
        mode: Option<String>,

        /// Restrict to a memory type (repeatable)
        #[arg(long = "type", value_name = "TYPE")]
        types: Vec<String>,

        /// Only memories from this window: all, today, week, month, quarter or year
        #[arg(long)]
        window: Option<String>,

        /// Disable the recency boost
        #[arg(long)]
        no_temporal_boost: bool,

        /// Override the API base URL
        #[arg(long)]
        api_url: Option<String>,
    },
    /// Show the effective configuration
    Config,
}

fn resolve_config(config_dir: Option<PathBuf>) -> SearchConfig {
    let dir = config_dir.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    load_config(&dir)
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to encode JSON: {e}"),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("memora=warn".parse().unwrap()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = resolve_config(cli.config_dir);
    tracing::debug!(api_url = %config.api_url, limit = config.limit, "config resolved");

    match cli.command {
        Commands::Config => {
            if cli.json {
                print_json(&config);
            } else {
                println!("API URL:        {}", config.api_url);
                println!("API token:      {}", if config.api_token.is_some() { "set" } else { "not set" });
                println!("Result limit:   {}", config.limit);
                println!("Timeout:        {}ms", config.request_timeout_ms);
                println!("Min query len:  {}", config.min_query_chars);
                println!("Memory types:   {}", config.type_vocabulary.iter().collect::<Vec<_>>().join(", "));
            }
            match config.validate() {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("Error: {e}");
                    ExitCode::from(2)
                }
            }
        }
        Commands::Search { query, mode, types, window, no_temporal_boost, api_url } => {
            if let Some(url) = api_url {
                config.api_url = url.trim_end_matches('/').to_string();
            }
            let client = match HttpSearchClient::new(&config) {
                Ok(c) => Arc::new(c),
                Err(e) => {
                    eprintln!("Error: {e}");
                    return ExitCode::from(2);
                }
            };

            let mut panel = SearchPanel::new(client, &config);
            panel.set_text(query.as_str());
            if let Some(mode) = mode {
                if let Err(e) = panel.set_mode_str(&mode) {
                    eprintln!("Error: {e}");
                    return ExitCode::from(2);
                }
            }
            if let Some(window) = window {
                if let Err(e) = panel.set_window_str(&window) {
                    eprintln!("Error: {e}");
                    return ExitCode::from(2);
                }
            }
            // Toggling is an involution, so each tag is applied once.
            let types: BTreeSet<String> = types.into_iter().collect();
            for tag in &types {
                if let Err(e) = panel.toggle_type(tag) {
                    eprintln!("Error: {e} (known: {})", config.type_vocabulary.iter().collect::<Vec<_>>().join(", "));
                    return ExitCode::from(2);
                }
            }
            if no_temporal_boost {
                panel.set_temporal_boost(false);
            }

            if let Err(e) = panel.run().await {
                eprintln!("Error: {e}");
                return ExitCode::from(2);
            }

            let view = panel.view();
            if cli.json {
                print_json(&view);
            } else {
                let (body, status) = render::render_view(&view);
                if !body.is_empty() {
                    println!("{body}");
                }
                eprintln!("{status}");
            }

            match view.kind() {
                ViewKind::Populated => ExitCode::SUCCESS,
                ViewKind::Empty => ExitCode::from(1),
                _ => ExitCode::from(2),
            }
        }
    }
}
