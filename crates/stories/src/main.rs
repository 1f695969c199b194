// SPDX-FileCopyrightText: 2026 Stories Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stories - a terminal story feed.
//!
//! This is the binary entry point: configuration, logging, and the
//! `feed`, `shell`, `status`, `reset`, and `config` subcommands.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod app;
mod feed;
mod shell;
mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use stories_config::StoriesConfig;
use stories_core::StoriesError;

use crate::app::App;

/// Stories - browse users' stories with timed playback.
#[derive(Parser, Debug)]
#[command(name = "stories", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the XDG hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the avatar feed.
    Feed {
        /// Number of pages to load.
        #[arg(long, default_value_t = 1)]
        pages: usize,
        /// Output as JSON.
        #[arg(long)]
        json: bool,
        /// Disable colors.
        #[arg(long)]
        plain: bool,
    },
    /// Launch an interactive story viewer session.
    Shell,
    /// Show persisted state and effective settings.
    Status {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
        /// Disable colors.
        #[arg(long)]
        plain: bool,
    },
    /// Forget every seen and liked story.
    Reset,
    /// Print the effective configuration as TOML.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => stories_config::load_and_validate_path(path),
        None => stories_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            stories_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.log_level);

    if let Err(e) = run(cli.command, config).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(command: Option<Commands>, config: StoriesConfig) -> Result<(), StoriesError> {
    match command {
        Some(Commands::Feed { pages, json, plain }) => {
            let app = App::open(config)?;
            feed::run_feed(&app, pages, json, plain)
        }
        Some(Commands::Shell) => shell::run_shell(App::open(config)?).await,
        Some(Commands::Status { json, plain }) => {
            let app = App::open(config)?;
            status::run_status(&app, json, plain)
        }
        Some(Commands::Reset) => {
            let app = App::open(config)?;
            app.state.reset()?;
            println!("seen and liked stories cleared");
            Ok(())
        }
        Some(Commands::Config) => {
            let out = toml::to_string_pretty(&config)
                .map_err(|e| StoriesError::Internal(format!("failed to encode config: {e}")))?;
            print!("{out}");
            Ok(())
        }
        None => {
            println!("stories: use --help for available commands");
            Ok(())
        }
    }
}

/// Initializes the tracing subscriber with the given log level.
///
/// Logs go to stderr so `--json` output stays machine-readable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("stories={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Only jemalloc supports advancing the epoch.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn feed_flags_parse() {
        let cli = Cli::parse_from(["stories", "feed", "--pages", "3", "--json"]);
        match cli.command {
            Some(Commands::Feed { pages, json, plain }) => {
                assert_eq!(pages, 3);
                assert!(json);
                assert!(!plain);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn default_config_serializes_to_toml() {
        let out = toml::to_string_pretty(&StoriesConfig::default()).unwrap();
        assert!(out.contains("[playback]"));
        assert!(out.contains("at_boundary = \"stay\""));
    }
}
