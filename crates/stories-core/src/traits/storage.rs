// SPDX-FileCopyrightText: 2026 Stories Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence trait for the seen and liked sets.

use crate::error::StoriesError;
use crate::types::PersistedState;

/// Durable home of the seen and liked sets.
///
/// `load` is best effort: an absent or undecodable value comes back as an
/// empty set, never as an error. `save` must be durable before it returns.
pub trait StateStore: Send + Sync {
    /// Reads both sets from the backend.
    fn load(&self) -> PersistedState;

    /// Writes both sets to the backend.
    fn save(&self, state: &PersistedState) -> Result<(), StoriesError>;

    /// Removes both sets from the backend.
    fn clear(&self) -> Result<(), StoriesError>;
}
