// SPDX-FileCopyrightText: 2026 Stories Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authoritative seen/liked state for the Stories feed.
//!
//! [`StoryStateManager`] keeps both sets in memory, writes them through to an
//! injected [`StateStore`] on every mutation, and broadcasts a [`StateEvent`]
//! for each change so views can refresh without polling.

pub mod manager;

pub use manager::{StateCounts, StoryStateManager};
