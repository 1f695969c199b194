// SPDX-FileCopyrightText: 2026 Stories Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Stories feed.
//!
//! This crate provides the domain types, the error type, and the capability
//! traits shared by the persistence layer, the feed controller, and the story
//! viewer. Each trait is implemented in its own crate and replaced by a test
//! double in `stories-test-utils`.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::StoriesError;
pub use types::{
    ParseStoryKeyError, PersistedState, StateEvent, Story, StoryKey, User, UserId,
};

pub use traits::{StateStore, StoryState, UserSource, ViewerDelegate};
