// SPDX-FileCopyrightText: 2026 Stories Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User feed for Stories.
//!
//! [`StaticDataSource`] serves fixed pages of users from a JSON dataset and
//! [`FeedController`] accumulates them into the scrollable feed, tracks the
//! selected user, and answers the viewer's neighbor requests.

pub mod controller;
pub mod source;

pub use controller::{Avatar, FeedController, LoadOutcome, RingStyle};
pub use source::StaticDataSource;
