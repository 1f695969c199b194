// SPDX-FileCopyrightText: 2026 Stories Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./stories.toml` > `~/.config/stories/stories.toml` > `/etc/stories/stories.toml`
//! with environment variable overrides via `STORIES_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::StoriesConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/stories/stories.toml` (system-wide)
/// 3. `~/.config/stories/stories.toml` (user XDG config)
/// 4. `./stories.toml` (local directory)
/// 5. `STORIES_*` environment variables
pub fn load_config() -> Result<StoriesConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<StoriesConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(StoriesConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<StoriesConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(StoriesConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(StoriesConfig::default()))
        .merge(Toml::file("/etc/stories/stories.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("stories/stories.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("stories.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")`: `STORIES_PLAYBACK_TICK_INTERVAL_MS`
/// must map to `playback.tick_interval_ms`, not `playback.tick.interval.ms`.
fn env_provider() -> Env {
    Env::prefixed("STORIES_").map(|key| {
        // Example: STORIES_STORAGE_DATABASE_PATH -> "storage_database_path".
        // Figment hands over the original casing.
        let key_str = key.as_str().to_ascii_lowercase();
        let mapped = key_str
            .replacen("logging_", "logging.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("playback_", "playback.", 1)
            .replacen("feed_", "feed.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BoundaryPolicy;

    #[test]
    #[serial_test::serial]
    fn env_vars_map_to_sections() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("STORIES_PLAYBACK_TICK_INTERVAL_MS", "50");
            jail.set_env("STORIES_PLAYBACK_AT_BOUNDARY", "dismiss");
            jail.set_env("STORIES_STORAGE_SEEN_KEY", "seen");
            jail.set_env("STORIES_STORAGE_SYNCHRONOUS", "normal");
            jail.set_env("STORIES_FEED_ON_EXHAUSTED", "wrap");

            let config: StoriesConfig = Figment::new()
                .merge(Serialized::defaults(StoriesConfig::default()))
                .merge(env_provider())
                .extract()?;

            assert_eq!(config.playback.tick_interval_ms, 50);
            assert_eq!(config.playback.at_boundary, BoundaryPolicy::Dismiss);
            assert_eq!(config.storage.seen_key, "seen");
            assert_eq!(config.storage.synchronous, crate::model::SyncMode::Normal);
            assert_eq!(
                config.feed.on_exhausted,
                crate::model::ExhaustionPolicy::Wrap
            );
            Ok(())
        });
    }

    #[test]
    #[serial_test::serial]
    fn env_overrides_apply_on_top_of_explicit_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "[playback]\ntick_interval_ms = 200\n")?;
            jail.set_env("STORIES_PLAYBACK_TICK_INTERVAL_MS", "25");

            let config = load_config_from_path(Path::new("custom.toml"))?;
            assert_eq!(config.playback.tick_interval_ms, 25);
            Ok(())
        });
    }

    #[test]
    #[serial_test::serial]
    fn local_file_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "custom.toml",
                r#"
[feed]
on_exhausted = "wrap"
"#,
            )?;

            let config = load_config_from_path(Path::new("custom.toml"))?;
            assert_eq!(
                config.feed.on_exhausted,
                crate::model::ExhaustionPolicy::Wrap
            );
            Ok(())
        });
    }
}
