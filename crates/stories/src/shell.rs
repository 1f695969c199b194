// SPDX-FileCopyrightText: 2026 Stories Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `stories shell` command implementation.
//!
//! Interactive REPL over the feed and a story viewer. Playback keeps ticking
//! in the background between commands; `status` shows where it is.

use std::io::IsTerminal;
use std::str::FromStr;

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use stories_core::{StoriesError, UserId};
use stories_feed::LoadOutcome;
use stories_viewer::{Phase, StoryViewer, Transition, ViewerSnapshot};
use tracing::debug;

use crate::app::App;
use crate::feed::render_feed;

const HELP: &str = "\
feed              list loaded users
more              load the next page
refresh           reload from the first page
open <id>         view a user's stories
next | prev       tap right or left
hold | release    pause or resume playback
heart             double tap (like)
like              toggle the like control
send <text>       reply to the story
status            show the viewer
close             dismiss the viewer
reset             forget every seen and liked story
/quit             exit";

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Feed,
    More,
    Refresh,
    Open(UserId),
    Next,
    Previous,
    Hold,
    Release,
    Heart,
    Like,
    Send(String),
    Status,
    Close,
    Reset,
    Help,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();
        let command = match word {
            "feed" | "ls" => ShellCommand::Feed,
            "more" => ShellCommand::More,
            "refresh" => ShellCommand::Refresh,
            "open" => {
                let id = rest
                    .parse::<u64>()
                    .map_err(|_| format!("usage: open <id>, got `{rest}`"))?;
                ShellCommand::Open(UserId(id))
            }
            "next" | "n" => ShellCommand::Next,
            "prev" | "p" => ShellCommand::Previous,
            "hold" => ShellCommand::Hold,
            "release" => ShellCommand::Release,
            "heart" => ShellCommand::Heart,
            "like" => ShellCommand::Like,
            "send" if !rest.is_empty() => ShellCommand::Send(rest.to_string()),
            "send" => return Err("usage: send <text>".to_string()),
            "status" | "s" => ShellCommand::Status,
            "close" => ShellCommand::Close,
            "reset" => ShellCommand::Reset,
            "help" | "?" => ShellCommand::Help,
            "/quit" | "/exit" => ShellCommand::Quit,
            other => return Err(format!("unknown command `{other}`, try `help`")),
        };
        Ok(command)
    }
}

/// Runs the `stories shell` interactive REPL.
pub async fn run_shell(app: App) -> Result<(), StoriesError> {
    let mut rl = DefaultEditor::new()
        .map_err(|e| StoriesError::Internal(format!("failed to initialize readline: {e}")))?;

    app.feed.load_more();

    println!("{}", "stories shell".bold().green());
    println!("Type {} for commands, {} to exit.\n", "help".yellow(), "/quit".yellow());

    let mut viewer: Option<StoryViewer> = None;
    let prompt = format!("{}> ", "stories".green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                let command = match trimmed.parse::<ShellCommand>() {
                    Ok(command) => command,
                    Err(message) => {
                        eprintln!("{}", message.yellow());
                        continue;
                    }
                };
                if command == ShellCommand::Quit {
                    break;
                }
                if let Err(e) = handle_command(&app, &mut viewer, command).await {
                    eprintln!("{}: {e}", "error".red());
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C
                break;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D
                break;
            }
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    if let Some(mut viewer) = viewer {
        viewer.dismiss().await;
    }
    Ok(())
}

async fn handle_command(
    app: &App,
    viewer: &mut Option<StoryViewer>,
    command: ShellCommand,
) -> Result<(), StoriesError> {
    debug!(?command, "shell command");
    match command {
        ShellCommand::Feed => {
            let use_color = std::io::stdout().is_terminal();
            for line in render_feed(&app.avatars(), use_color) {
                println!("{line}");
            }
        }
        ShellCommand::More => match app.feed.load_more() {
            LoadOutcome::Loaded(n) => println!("loaded {n} users"),
            LoadOutcome::Wrapped(n) => println!("wrapped around, loaded {n} users"),
            LoadOutcome::Exhausted => println!("{}", "no more users".dimmed()),
            LoadOutcome::Skipped => println!("{}", "nothing to load".dimmed()),
        },
        ShellCommand::Refresh => {
            app.feed.refresh();
            println!("feed reloaded, {} users", app.feed.len());
        }
        ShellCommand::Open(user_id) => {
            if let Some(mut previous) = viewer.take() {
                previous.dismiss().await;
            }
            match app.open_viewer(user_id) {
                Some(opened) => {
                    println!("{}", render_snapshot(&opened.snapshot().await));
                    *viewer = Some(opened);
                }
                None => println!("{}", format!("user {user_id} is not in the feed").yellow()),
            }
        }
        ShellCommand::Reset => {
            app.state.reset()?;
            println!("seen and liked stories cleared");
        }
        ShellCommand::Help => println!("{HELP}"),
        ShellCommand::Quit => {}
        command => {
            let Some(open) = viewer.as_mut() else {
                println!("{}", "no viewer open, use `open <id>`".yellow());
                return Ok(());
            };
            handle_viewer_command(open, command).await?;
        }
    }
    Ok(())
}

async fn handle_viewer_command(
    viewer: &mut StoryViewer,
    command: ShellCommand,
) -> Result<(), StoriesError> {
    let transition = match command {
        ShellCommand::Next => viewer.tap_next().await,
        ShellCommand::Previous => viewer.tap_previous().await,
        ShellCommand::Hold => viewer.press().await,
        ShellCommand::Release => viewer.release().await,
        ShellCommand::Heart => {
            viewer.double_tap().await;
            Transition::None
        }
        ShellCommand::Like => {
            viewer.toggle_like().await;
            Transition::None
        }
        ShellCommand::Send(text) => {
            viewer.send_message(&text).await?;
            Transition::None
        }
        ShellCommand::Close => viewer.dismiss().await,
        _ => Transition::None,
    };
    if transition == Transition::NoNeighbor {
        println!("{}", "no more users in that direction".dimmed());
    }
    println!("{}", render_snapshot(&viewer.snapshot().await));
    Ok(())
}

/// One-line text rendering of a viewer.
pub fn render_snapshot(snapshot: &ViewerSnapshot) -> String {
    const WIDTH: usize = 8;
    let bars: Vec<String> = snapshot
        .segments
        .iter()
        .map(|fill| {
            let filled = (fill * WIDTH as f64).floor() as usize;
            format!("{}{}", "#".repeat(filled), "-".repeat(WIDTH - filled.min(WIDTH)))
        })
        .collect();
    let mut line = format!(
        "{} [{}] story {}/{} {}",
        snapshot.user.name,
        bars.join("|"),
        snapshot.story_index + 1,
        snapshot.story_count,
        snapshot.image_url
    );
    if snapshot.liked {
        line.push_str(" <3");
    }
    match snapshot.phase {
        Phase::Playing => {}
        Phase::Paused => line.push_str(" (paused)"),
        Phase::Dismissed => line.push_str(" (closed)"),
    }
    line
}
