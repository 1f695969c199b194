// SPDX-FileCopyrightText: 2026 Stories Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `StoryState` double that records every mutation.

use std::collections::HashSet;
use std::sync::Mutex;

use stories_core::{StoriesError, StoryKey, StoryState, UserId};

/// A mutation observed by [`MockStoryState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateCall {
    MarkSeen(StoryKey),
    ToggleLiked(StoryKey),
}

/// Non-persistent seen/liked state with a call log.
#[derive(Debug, Default)]
pub struct MockStoryState {
    seen: Mutex<HashSet<StoryKey>>,
    liked: Mutex<HashSet<StoryKey>>,
    calls: Mutex<Vec<StateCall>>,
}

impl MockStoryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every mutation so far, oldest first.
    pub fn calls(&self) -> Vec<StateCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Story indexes of `user_id` marked seen, in call order.
    pub fn seen_indexes(&self, user_id: UserId) -> Vec<usize> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                StateCall::MarkSeen(key) if key.user_id == user_id => Some(key.story_index),
                _ => None,
            })
            .collect()
    }
}

impl StoryState for MockStoryState {
    fn mark_seen(&self, user_id: UserId, story_index: usize) -> Result<(), StoriesError> {
        let key = StoryKey::new(user_id, story_index);
        self.calls.lock().unwrap().push(StateCall::MarkSeen(key));
        self.seen.lock().unwrap().insert(key);
        Ok(())
    }

    fn is_seen(&self, user_id: UserId, story_index: usize) -> bool {
        self.seen
            .lock()
            .unwrap()
            .contains(&StoryKey::new(user_id, story_index))
    }

    fn toggle_liked(&self, user_id: UserId, story_index: usize) -> Result<bool, StoriesError> {
        let key = StoryKey::new(user_id, story_index);
        self.calls.lock().unwrap().push(StateCall::ToggleLiked(key));
        let mut liked = self.liked.lock().unwrap();
        if liked.remove(&key) {
            Ok(false)
        } else {
            liked.insert(key);
            Ok(true)
        }
    }

    fn is_liked(&self, user_id: UserId, story_index: usize) -> bool {
        self.liked
            .lock()
            .unwrap()
            .contains(&StoryKey::new(user_id, story_index))
    }
}
