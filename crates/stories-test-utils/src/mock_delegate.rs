// SPDX-FileCopyrightText: 2026 Stories Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `ViewerDelegate` double with a fixed user order.

use std::sync::Mutex;

use stories_core::{User, UserId, ViewerDelegate};

/// A callback received by [`RecordingDelegate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelegateCall {
    NextUser(UserId),
    PreviousUser(UserId),
    Dismissed(UserId),
}

/// Answers neighbor requests from a fixed list and records every callback.
#[derive(Debug, Default)]
pub struct RecordingDelegate {
    order: Vec<User>,
    calls: Mutex<Vec<DelegateCall>>,
}

impl RecordingDelegate {
    /// A delegate with no neighbors at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// A delegate whose neighbors follow `order`.
    pub fn with_order(order: Vec<User>) -> Self {
        Self {
            order,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<DelegateCall> {
        self.calls.lock().unwrap().clone()
    }

    fn position(&self, user: &User) -> Option<usize> {
        self.order.iter().position(|u| u.id == user.id)
    }
}

impl ViewerDelegate for RecordingDelegate {
    fn next_user(&self, current: &User) -> Option<User> {
        self.calls
            .lock()
            .unwrap()
            .push(DelegateCall::NextUser(current.id));
        let index = self.position(current)?;
        self.order.get(index + 1).cloned()
    }

    fn previous_user(&self, current: &User) -> Option<User> {
        self.calls
            .lock()
            .unwrap()
            .push(DelegateCall::PreviousUser(current.id));
        let index = self.position(current)?;
        index.checked_sub(1).and_then(|i| self.order.get(i).cloned())
    }

    fn dismissed(&self, user: &User) {
        self.calls
            .lock()
            .unwrap()
            .push(DelegateCall::Dismissed(user.id));
    }
}
