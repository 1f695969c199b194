// SPDX-FileCopyrightText: 2026 Stories Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Encoding of a story-key set as a JSON array of strings.

use std::collections::BTreeSet;

use stories_core::{StoriesError, StoryKey};
use tracing::warn;

/// Encodes `set` as a sorted JSON array of `"{user_id}-{story_index}"` strings.
pub fn encode_set(set: &BTreeSet<StoryKey>) -> Result<Vec<u8>, StoriesError> {
    let keys: Vec<String> = set.iter().map(ToString::to_string).collect();
    serde_json::to_vec(&keys).map_err(|e| StoriesError::Internal(format!("encode failed: {e}")))
}

/// Decodes the blob stored under `key`.
///
/// A blob that is not a JSON array of strings is a [`StoriesError::Decode`].
/// Array entries that are not story keys are skipped with a warning.
pub fn decode_set(key: &str, bytes: &[u8]) -> Result<BTreeSet<StoryKey>, StoriesError> {
    let raw: Vec<String> = serde_json::from_slice(bytes).map_err(|e| StoriesError::Decode {
        key: key.to_string(),
        message: e.to_string(),
    })?;

    let mut set = BTreeSet::new();
    for entry in raw {
        match entry.parse::<StoryKey>() {
            Ok(story_key) => {
                set.insert(story_key);
            }
            Err(e) => warn!(key, error = %e, "skipping malformed entry"),
        }
    }
    Ok(set)
}
