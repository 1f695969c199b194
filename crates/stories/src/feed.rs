// SPDX-FileCopyrightText: 2026 Stories Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `stories feed` command implementation.
//!
//! Loads the requested number of pages and prints one line per avatar,
//! marking users with unseen stories.

use std::io::IsTerminal;

use serde::Serialize;
use stories_core::StoriesError;
use stories_feed::{Avatar, LoadOutcome, RingStyle};

use crate::app::App;

/// One avatar in `--json` output.
#[derive(Debug, Serialize)]
pub struct FeedEntry {
    pub id: u64,
    pub name: String,
    pub profile_picture_url: String,
    pub story_count: usize,
    pub unseen: bool,
}

impl From<&Avatar> for FeedEntry {
    fn from(avatar: &Avatar) -> Self {
        Self {
            id: avatar.user.id.0,
            name: avatar.user.name.clone(),
            profile_picture_url: avatar.user.profile_picture_url.clone(),
            story_count: avatar.story_count,
            unseen: avatar.ring == RingStyle::Unseen,
        }
    }
}

/// Run the `stories feed` command.
pub fn run_feed(app: &App, pages: usize, json: bool, plain: bool) -> Result<(), StoriesError> {
    for _ in 0..pages {
        if matches!(
            app.feed.load_more(),
            LoadOutcome::Exhausted | LoadOutcome::Skipped
        ) {
            break;
        }
    }

    let avatars = app.avatars();
    if json {
        let entries: Vec<FeedEntry> = avatars.iter().map(FeedEntry::from).collect();
        let out = serde_json::to_string_pretty(&entries)
            .map_err(|e| StoriesError::Internal(format!("failed to encode feed: {e}")))?;
        println!("{out}");
    } else {
        let use_color = !plain && std::io::stdout().is_terminal();
        for line in render_feed(&avatars, use_color) {
            println!("{line}");
        }
    }
    Ok(())
}

/// Text rendering of a whole feed, one line per avatar.
pub fn render_feed(avatars: &[Avatar], use_color: bool) -> Vec<String> {
    if avatars.is_empty() {
        return vec!["  (no users)".to_string()];
    }
    avatars
        .iter()
        .map(|avatar| format_avatar(avatar, use_color))
        .collect()
}

/// One feed line: ring marker, id, name, and story count.
pub fn format_avatar(avatar: &Avatar, use_color: bool) -> String {
    let line = format!(
        "{:>4}  {:<12} {} stories",
        avatar.user.id, avatar.user.name, avatar.story_count
    );
    match (avatar.ring, use_color) {
        (RingStyle::Unseen, true) => {
            use colored::Colorize;
            format!("  {} {line}", "●".magenta())
        }
        (RingStyle::AllSeen, true) => {
            use colored::Colorize;
            format!("  {} {}", "○".dimmed(), line.dimmed())
        }
        (RingStyle::Unseen, false) => format!("  * {line}"),
        (RingStyle::AllSeen, false) => format!("    {line}"),
    }
}

#[cfg(test)]
mod tests {
    use stories_test_utils::user;

    use super::*;

    fn avatar(id: u64, ring: RingStyle) -> Avatar {
        let user = user(id);
        Avatar {
            story_count: user.story_count(),
            user,
            ring,
        }
    }

    #[test]
    fn plain_lines_mark_unseen_users() {
        let line = format_avatar(&avatar(7, RingStyle::Unseen), false);
        assert!(line.starts_with("  * "));
        assert!(line.contains("user7"));
        assert!(line.ends_with("4 stories"));

        let seen = format_avatar(&avatar(7, RingStyle::AllSeen), false);
        assert!(!seen.contains('*'));
    }

    #[test]
    fn uncolored_feed_has_no_escape_codes() {
        colored::control::set_override(true);
        let avatars = vec![avatar(1, RingStyle::Unseen), avatar(2, RingStyle::AllSeen)];
        let plain = render_feed(&avatars, false);
        assert_eq!(plain.len(), 2);
        assert!(plain.iter().all(|line| !line.contains('\u{1b}')));

        let tinted = render_feed(&avatars, true);
        assert!(tinted.iter().any(|line| line.contains('\u{1b}')));
        colored::control::unset_override();
    }

    #[test]
    fn empty_feed_says_so() {
        assert_eq!(render_feed(&[], false), vec!["  (no users)".to_string()]);
    }

    #[test]
    fn feed_entry_serializes() {
        let entry = FeedEntry::from(&avatar(2, RingStyle::AllSeen));
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"id\":2"));
        assert!(json.contains("\"story_count\":5"));
        assert!(json.contains("\"unseen\":false"));
    }
}
