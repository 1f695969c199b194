// SPDX-FileCopyrightText: 2026 Stories Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as non-empty paths, distinct storage keys, and positive durations.

use crate::diagnostic::ConfigError;
use crate::model::{StorageBackend, StoriesConfig};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &StoriesConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.logging.log_level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.log_level `{}` is not one of {}",
                config.logging.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.storage.backend == StorageBackend::Sqlite
        && config.storage.database_path.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.storage.seen_key.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.seen_key must not be empty".to_string(),
        });
    }

    if config.storage.liked_key.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.liked_key must not be empty".to_string(),
        });
    }

    if config.storage.seen_key == config.storage.liked_key {
        errors.push(ConfigError::Validation {
            message: format!(
                "storage.seen_key and storage.liked_key must differ, both are `{}`",
                config.storage.seen_key
            ),
        });
    }

    let duration = config.playback.story_duration_secs;
    if !duration.is_finite() || duration <= 0.0 {
        errors.push(ConfigError::Validation {
            message: format!("playback.story_duration_secs must be positive, got {duration}"),
        });
    }

    if config.playback.tick_interval_ms == 0 {
        errors.push(ConfigError::Validation {
            message: "playback.tick_interval_ms must be at least 1".to_string(),
        });
    } else if duration.is_finite()
        && duration * 1000.0 < config.playback.tick_interval_ms as f64
    {
        errors.push(ConfigError::Validation {
            message: format!(
                "playback.story_duration_secs ({duration}) is shorter than one tick ({} ms)",
                config.playback.tick_interval_ms
            ),
        });
    }

    if let Some(path) = &config.feed.dataset_path {
        if path.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "feed.dataset_path must not be empty when set".to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
