// SPDX-FileCopyrightText: 2026 Stories Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Seen/liked capability used by the feed and the viewer.

use crate::error::StoriesError;
use crate::types::UserId;

/// Queries and mutations over per-story seen and liked state.
///
/// Mutations take effect immediately for subsequent queries even when
/// persisting them fails; the error is returned so the caller can log it.
pub trait StoryState: Send + Sync {
    /// Marks a story as seen. Seen state is never removed.
    fn mark_seen(&self, user_id: UserId, story_index: usize) -> Result<(), StoriesError>;

    fn is_seen(&self, user_id: UserId, story_index: usize) -> bool;

    /// Flips the liked flag and returns the new value.
    fn toggle_liked(&self, user_id: UserId, story_index: usize) -> Result<bool, StoriesError>;

    fn is_liked(&self, user_id: UserId, story_index: usize) -> bool;

    /// True iff any index in `0..story_count` has not been seen.
    fn has_unseen(&self, user_id: UserId, story_count: usize) -> bool {
        (0..story_count).any(|index| !self.is_seen(user_id, index))
    }
}
