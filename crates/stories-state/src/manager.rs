// SPDX-FileCopyrightText: 2026 Stories Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Write-through seen/liked state manager.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use stories_core::{PersistedState, StateEvent, StateStore, StoriesError, StoryKey, StoryState, UserId};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Buffered change events per subscriber before the oldest are dropped.
const EVENT_CAPACITY: usize = 256;

/// Sizes of the two sets, for status output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateCounts {
    pub seen: usize,
    pub liked: usize,
}

/// Owns the seen and liked sets and their persistence round-trip.
///
/// All operations go through one lock, so concurrent callers are serialized
/// and a save always reflects every mutation made before it.
pub struct StoryStateManager {
    store: Arc<dyn StateStore>,
    sets: RwLock<PersistedState>,
    events: broadcast::Sender<StateEvent>,
}

impl StoryStateManager {
    /// Loads the current sets from `store`.
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        let sets = store.load();
        info!(
            seen = sets.seen.len(),
            liked = sets.liked.len(),
            "story state loaded"
        );
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            store,
            sets: RwLock::new(sets),
            events,
        }
    }

    /// Receives every change made after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<StateEvent> {
        self.events.subscribe()
    }

    pub fn counts(&self) -> StateCounts {
        let sets = self.read();
        StateCounts {
            seen: sets.seen.len(),
            liked: sets.liked.len(),
        }
    }

    /// Deletes all persisted state and reloads the (now empty) sets in place.
    ///
    /// Debug affordance; existing handles to this manager stay valid.
    pub fn reset(&self) -> Result<(), StoriesError> {
        let mut sets = self.write();
        self.store.clear()?;
        *sets = self.store.load();
        drop(sets);
        info!("story state reset");
        self.emit(StateEvent::Reset);
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, PersistedState> {
        self.sets.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, PersistedState> {
        self.sets.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, sets: &PersistedState, key: StoryKey) -> Result<(), StoriesError> {
        self.store.save(sets).inspect_err(|e| {
            warn!(key = %key, error = %e, "failed to persist story state");
        })
    }

    fn emit(&self, event: StateEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

impl StoryState for StoryStateManager {
    fn mark_seen(&self, user_id: UserId, story_index: usize) -> Result<(), StoriesError> {
        let key = StoryKey::new(user_id, story_index);
        let mut sets = self.write();
        if !sets.seen.insert(key) {
            return Ok(());
        }
        debug!(key = %key, "story seen");
        let result = self.persist(&sets, key);
        drop(sets);
        self.emit(StateEvent::Seen(key));
        result
    }

    fn is_seen(&self, user_id: UserId, story_index: usize) -> bool {
        self.read()
            .seen
            .contains(&StoryKey::new(user_id, story_index))
    }

    fn toggle_liked(&self, user_id: UserId, story_index: usize) -> Result<bool, StoriesError> {
        let key = StoryKey::new(user_id, story_index);
        let mut sets = self.write();
        let liked = if sets.liked.remove(&key) {
            false
        } else {
            sets.liked.insert(key);
            true
        };
        debug!(key = %key, liked, "story like toggled");
        let result = self.persist(&sets, key);
        drop(sets);
        self.emit(StateEvent::LikeToggled { key, liked });
        result.map(|()| liked)
    }

    fn is_liked(&self, user_id: UserId, story_index: usize) -> bool {
        self.read()
            .liked
            .contains(&StoryKey::new(user_id, story_index))
    }

    fn has_unseen(&self, user_id: UserId, story_count: usize) -> bool {
        let sets = self.read();
        (0..story_count).any(|index| !sets.seen.contains(&StoryKey::new(user_id, index)))
    }
}
