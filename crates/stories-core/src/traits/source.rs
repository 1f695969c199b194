// SPDX-FileCopyrightText: 2026 Stories Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Paginated provider of users.

use crate::types::User;

/// A source of users split into fixed pages.
pub trait UserSource: Send + Sync {
    /// Returns the users on page `index`.
    ///
    /// An empty page means the source is exhausted; it is not an error.
    fn page(&self, index: usize) -> Vec<User>;
}
