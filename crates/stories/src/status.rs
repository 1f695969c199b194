// SPDX-FileCopyrightText: 2026 Stories Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `stories status` command implementation.
//!
//! Reports where seen and liked state lives, how much of it there is, and
//! the effective playback and pagination settings.

use std::io::IsTerminal;

use serde::Serialize;
use stories_config::{StorageBackend, StoriesConfig};
use stories_core::StoriesError;
use stories_state::StateCounts;

use crate::app::App;

/// Structured status output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub backend: String,
    pub database_path: Option<String>,
    pub seen: usize,
    pub liked: usize,
    pub story_duration_secs: f64,
    pub tick_interval_ms: u64,
    pub ticks_per_story: u32,
    pub at_boundary: String,
    pub on_exhausted: String,
}

impl StatusResponse {
    pub fn new(config: &StoriesConfig, counts: StateCounts) -> Self {
        let database_path = match config.storage.backend {
            StorageBackend::Sqlite => Some(config.storage.database_path.clone()),
            StorageBackend::Memory => None,
        };
        Self {
            backend: config.storage.backend.to_string(),
            database_path,
            seen: counts.seen,
            liked: counts.liked,
            story_duration_secs: config.playback.story_duration_secs,
            tick_interval_ms: config.playback.tick_interval_ms,
            ticks_per_story: config.playback.ticks_per_story(),
            at_boundary: config.playback.at_boundary.to_string(),
            on_exhausted: config.feed.on_exhausted.to_string(),
        }
    }
}

/// Run the `stories status` command.
///
/// If `--json` is passed, outputs structured JSON for scripting.
/// If `--plain` is passed or stdout is not a TTY, disables colors.
pub fn run_status(app: &App, json: bool, plain: bool) -> Result<(), StoriesError> {
    let status = StatusResponse::new(&app.config, app.state.counts());
    if json {
        let out = serde_json::to_string_pretty(&status)
            .map_err(|e| StoriesError::Internal(format!("failed to encode status: {e}")))?;
        println!("{out}");
    } else {
        let use_color = !plain && std::io::stdout().is_terminal();
        print_status(&status, use_color);
    }
    Ok(())
}

fn print_status(status: &StatusResponse, use_color: bool) {
    println!();
    println!("  stories status");
    println!("  {}", "-".repeat(35));

    let storage = match &status.database_path {
        Some(path) => format!("{} ({path})", status.backend),
        None => status.backend.clone(),
    };
    if use_color {
        use colored::Colorize;
        println!("    Storage:  {}", storage.green());
    } else {
        println!("    Storage:  {storage}");
    }
    println!("    Seen:     {}", status.seen);
    println!("    Liked:    {}", status.liked);
    println!(
        "    Playback: {}s per story, {} ticks of {}ms, at boundary: {}",
        status.story_duration_secs,
        status.ticks_per_story,
        status.tick_interval_ms,
        status.at_boundary
    );
    println!("    Feed:     on exhausted: {}", status.on_exhausted);
    println!();
}
