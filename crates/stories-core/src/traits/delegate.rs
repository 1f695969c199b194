// SPDX-FileCopyrightText: 2026 Stories Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Callbacks from a story viewer to whoever presented it.

use crate::types::User;

/// Receives navigation requests a viewer cannot satisfy on its own.
///
/// The viewer calls `next_user`/`previous_user` when it runs past either end
/// of the current user's stories, and `dismissed` when the session ends.
pub trait ViewerDelegate: Send + Sync {
    /// The user after `current`, or `None` when there is none.
    fn next_user(&self, current: &User) -> Option<User>;

    /// The user before `current`, or `None` when there is none.
    fn previous_user(&self, current: &User) -> Option<User>;

    /// The viewer showing `user` was dismissed.
    fn dismissed(&self, user: &User);
}
