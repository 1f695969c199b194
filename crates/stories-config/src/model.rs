// SPDX-FileCopyrightText: 2026 Stories Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Stories feed.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Top-level Stories configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StoriesConfig {
    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Seen/liked persistence settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Story viewer playback settings.
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// Avatar feed and dataset settings.
    #[serde(default)]
    pub feed: FeedConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Which key-value backend holds the seen and liked sets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StorageBackend {
    /// SQLite database file on disk.
    #[default]
    Sqlite,
    /// Process-local map; nothing survives a restart.
    Memory,
}

/// How hard SQLite syncs each commit to disk.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SyncMode {
    /// Every commit is durable before it returns.
    #[default]
    Full,
    /// WAL commits may roll back after power loss.
    Normal,
}

/// Persistence configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Backend holding the persisted sets.
    #[serde(default)]
    pub backend: StorageBackend,

    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,

    /// SQLite `synchronous` level. `normal` trades crash durability of the
    /// last commits for fewer fsyncs in WAL mode.
    #[serde(default)]
    pub synchronous: SyncMode,

    /// Key under which the seen set is stored.
    #[serde(default = "default_seen_key")]
    pub seen_key: String,

    /// Key under which the liked set is stored.
    #[serde(default = "default_liked_key")]
    pub liked_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
            synchronous: SyncMode::default(),
            seen_key: default_seen_key(),
            liked_key: default_liked_key(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("stories").join("stories.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("stories.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

fn default_seen_key() -> String {
    "com.stories.seenStories".to_string()
}

fn default_liked_key() -> String {
    "com.stories.likedStories".to_string()
}

/// What a viewer does when there is no user before or after the current one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BoundaryPolicy {
    /// Keep showing the current user.
    #[default]
    Stay,
    /// Close the viewer.
    Dismiss,
}

/// Story viewer playback configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PlaybackConfig {
    /// How long one story stays on screen, in seconds.
    #[serde(default = "default_story_duration_secs")]
    pub story_duration_secs: f64,

    /// Period of the progress timer, in milliseconds.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Behavior at the first or last user of the feed.
    #[serde(default)]
    pub at_boundary: BoundaryPolicy,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            story_duration_secs: default_story_duration_secs(),
            tick_interval_ms: default_tick_interval_ms(),
            at_boundary: BoundaryPolicy::default(),
        }
    }
}

impl PlaybackConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Number of ticks after which a story auto-advances (never zero).
    pub fn ticks_per_story(&self) -> u32 {
        if self.tick_interval_ms == 0 {
            return 1;
        }
        let ticks = (self.story_duration_secs * 1000.0 / self.tick_interval_ms as f64).round();
        if ticks.is_finite() && ticks >= 1.0 {
            ticks.min(u32::MAX as f64) as u32
        } else {
            1
        }
    }
}

fn default_story_duration_secs() -> f64 {
    15.0
}

fn default_tick_interval_ms() -> u64 {
    100
}

/// What the feed does once the dataset runs out of pages.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExhaustionPolicy {
    /// Stop paginating.
    #[default]
    Stop,
    /// Start over from the first page.
    Wrap,
}

/// Feed configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FeedConfig {
    /// Behavior when a requested page is empty.
    #[serde(default)]
    pub on_exhausted: ExhaustionPolicy,

    /// JSON dataset to load instead of the bundled one.
    #[serde(default)]
    pub dataset_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_playback_is_150_ticks_per_story() {
        let playback = PlaybackConfig::default();
        assert_eq!(playback.tick_interval(), Duration::from_millis(100));
        assert_eq!(playback.ticks_per_story(), 150);
    }

    #[test]
    fn ticks_per_story_never_reaches_zero() {
        let playback = PlaybackConfig {
            story_duration_secs: 0.01,
            tick_interval_ms: 100,
            ..Default::default()
        };
        assert_eq!(playback.ticks_per_story(), 1);

        let zero_tick = PlaybackConfig {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(zero_tick.ticks_per_story(), 1);
    }

    #[test]
    fn policies_parse_from_lowercase() {
        use std::str::FromStr;

        assert_eq!(BoundaryPolicy::from_str("dismiss").unwrap(), BoundaryPolicy::Dismiss);
        assert_eq!(ExhaustionPolicy::from_str("wrap").unwrap(), ExhaustionPolicy::Wrap);
        assert_eq!(StorageBackend::Memory.to_string(), "memory");
    }
}
