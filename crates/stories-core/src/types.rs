// SPDX-FileCopyrightText: 2026 Stories Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the feed, the viewer, and the persistence layer.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unique identifier of a user in the dataset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user as it appears in the dataset. Never mutated after loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[serde(rename = "profilePictureURL")]
    pub profile_picture_url: String,
}

impl User {
    /// Number of stories this user has.
    ///
    /// Synthetic rule inherited from the dataset generator: `(id mod 3) + 3`.
    pub fn story_count(&self) -> usize {
        (self.id.0 % 3) as usize + 3
    }
}

/// The ordered story images of one user, built when a viewer opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Story {
    pub user_id: UserId,
    pub image_urls: Vec<String>,
}

impl Story {
    /// Builds the story sequence for `user`.
    pub fn for_user(user: &User) -> Self {
        let image_urls = (0..user.story_count())
            .map(|index| format!("https://picsum.photos/seed/{}-{index}/1080/1920", user.id))
            .collect();
        Self {
            user_id: user.id,
            image_urls,
        }
    }

    pub fn len(&self) -> usize {
        self.image_urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.image_urls.is_empty()
    }

    /// Index of the final story, or `None` for an empty sequence.
    pub fn last_index(&self) -> Option<usize> {
        self.image_urls.len().checked_sub(1)
    }
}

/// Identifies one story of one user; the key into the seen and liked sets.
///
/// Its string form is `"{user_id}-{story_index}"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StoryKey {
    pub user_id: UserId,
    pub story_index: usize,
}

impl StoryKey {
    pub fn new(user_id: UserId, story_index: usize) -> Self {
        Self {
            user_id,
            story_index,
        }
    }
}

impl fmt::Display for StoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.user_id, self.story_index)
    }
}

/// Returned when a string is not of the form `"{user_id}-{story_index}"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid story key `{0}`")]
pub struct ParseStoryKeyError(pub String);

impl FromStr for StoryKey {
    type Err = ParseStoryKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseStoryKeyError(s.to_string());
        let (user, index) = s.split_once('-').ok_or_else(invalid)?;
        let user_id = user.parse::<u64>().map_err(|_| invalid())?;
        let story_index = index.parse::<usize>().map_err(|_| invalid())?;
        Ok(StoryKey::new(UserId(user_id), story_index))
    }
}

/// The two persisted sets, as loaded from or written to a store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedState {
    pub seen: BTreeSet<StoryKey>,
    pub liked: BTreeSet<StoryKey>,
}

/// Change notifications emitted by the story state manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateEvent {
    /// A story was marked seen for the first time.
    Seen(StoryKey),
    /// A story's liked flag flipped.
    LikeToggled { key: StoryKey, liked: bool },
    /// All persisted state was cleared.
    Reset,
}
