// SPDX-FileCopyrightText: 2026 Stories Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability traits at the seams between the Stories crates.
//!
//! Each trait has one production implementation in its own crate and a
//! test double in `stories-test-utils`.

pub mod delegate;
pub mod source;
pub mod state;
pub mod storage;

pub use delegate::ViewerDelegate;
pub use source::UserSource;
pub use state::StoryState;
pub use storage::StateStore;
