// SPDX-FileCopyrightText: 2026 Stories Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Users, paged sources, and dataset JSON for tests.

use std::sync::Mutex;

use stories_core::{User, UserId, UserSource};

/// A user with predictable name and avatar URL.
pub fn user(id: u64) -> User {
    User {
        id: UserId(id),
        name: format!("user{id}"),
        profile_picture_url: format!("https://i.pravatar.cc/300?u={id}"),
    }
}

/// Users with the given ids, in order.
pub fn users(ids: impl IntoIterator<Item = u64>) -> Vec<User> {
    ids.into_iter().map(user).collect()
}

/// A dataset document with `pages` pages of `per_page` users, ids from 1.
pub fn dataset_json(pages: usize, per_page: usize) -> String {
    let pages: Vec<serde_json::Value> = (0..pages)
        .map(|page| {
            let start = (page * per_page) as u64 + 1;
            let users = users(start..start + per_page as u64);
            serde_json::json!({ "users": users })
        })
        .collect();
    serde_json::json!({ "pages": pages }).to_string()
}

/// `UserSource` over in-memory pages that logs which pages were requested.
#[derive(Debug, Default)]
pub struct PagedSource {
    pages: Vec<Vec<User>>,
    requests: Mutex<Vec<usize>>,
}

impl PagedSource {
    pub fn new(pages: Vec<Vec<User>>) -> Self {
        Self {
            pages,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// `pages` pages of `per_page` users, ids from 1.
    pub fn sequential(pages: usize, per_page: usize) -> Self {
        Self::new(
            (0..pages)
                .map(|page| {
                    let start = (page * per_page) as u64 + 1;
                    users(start..start + per_page as u64)
                })
                .collect(),
        )
    }

    pub fn requests(&self) -> Vec<usize> {
        self.requests.lock().unwrap().clone()
    }
}

impl UserSource for PagedSource {
    fn page(&self, index: usize) -> Vec<User> {
        self.requests.lock().unwrap().push(index);
        self.pages.get(index).cloned().unwrap_or_default()
    }
}
