// SPDX-FileCopyrightText: 2026 Stories Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Stories tests.
//!
//! Provides deterministic in-memory doubles for every capability trait in
//! `stories-core`, plus dataset fixtures.
//!
//! # Components
//!
//! - [`RecordingStore`] / [`FailingStore`] - `StateStore` doubles
//! - [`MockStoryState`] - `StoryState` double with a call log
//! - [`RecordingDelegate`] - `ViewerDelegate` double with scripted neighbors
//! - [`fixtures`] - users, paged sources, and dataset JSON

pub mod fixtures;
pub mod mock_delegate;
pub mod mock_state;
pub mod mock_store;

pub use fixtures::{dataset_json, user, users, PagedSource};
pub use mock_delegate::{DelegateCall, RecordingDelegate};
pub use mock_state::{MockStoryState, StateCall};
pub use mock_store::{FailingStore, RecordingStore};
