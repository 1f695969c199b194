// SPDX-FileCopyrightText: 2026 Stories Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Story viewer for Stories.
//!
//! [`ViewerSession`] is the synchronous state machine (current story,
//! progress, pause, likes, user changes, dismissal). [`StoryViewer`] wraps it
//! with a [`PlaybackTimer`] that ticks it on a tokio interval.

pub mod playback;
pub mod session;
pub mod viewer;

pub use playback::PlaybackTimer;
pub use session::{Phase, Transition, ViewerSession, ViewerSnapshot};
pub use viewer::StoryViewer;
