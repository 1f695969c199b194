// SPDX-FileCopyrightText: 2026 Stories Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `StateStore` doubles.

use std::sync::Mutex;

use stories_core::{PersistedState, StateStore, StoriesError};

/// In-memory store that remembers what was saved and how often.
#[derive(Debug, Default)]
pub struct RecordingStore {
    saved: Mutex<Option<PersistedState>>,
    saves: Mutex<usize>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts out holding `state`, as if a previous run had saved it.
    pub fn with_state(state: PersistedState) -> Self {
        Self {
            saved: Mutex::new(Some(state)),
            saves: Mutex::new(0),
        }
    }

    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap()
    }

    /// The most recently saved state (empty if nothing was saved).
    pub fn last_saved(&self) -> PersistedState {
        self.saved.lock().unwrap().clone().unwrap_or_default()
    }
}

impl StateStore for RecordingStore {
    fn load(&self) -> PersistedState {
        self.last_saved()
    }

    fn save(&self, state: &PersistedState) -> Result<(), StoriesError> {
        *self.saved.lock().unwrap() = Some(state.clone());
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoriesError> {
        *self.saved.lock().unwrap() = None;
        Ok(())
    }
}

/// Store whose writes always fail, as a full or read-only disk would.
#[derive(Debug, Default)]
pub struct FailingStore;

impl FailingStore {
    pub fn new() -> Self {
        Self
    }
}

impl StateStore for FailingStore {
    fn load(&self) -> PersistedState {
        PersistedState::default()
    }

    fn save(&self, _state: &PersistedState) -> Result<(), StoriesError> {
        Err(StoriesError::storage(std::io::Error::other("disk full")))
    }

    fn clear(&self) -> Result<(), StoriesError> {
        Err(StoriesError::storage(std::io::Error::other("disk full")))
    }
}
