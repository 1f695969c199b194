// SPDX-FileCopyrightText: 2026 Stories Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Feed controller: the loaded user list, pagination, and selection.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use stories_config::ExhaustionPolicy;
use stories_core::{StoryState, User, UserId, UserSource, ViewerDelegate};
use tracing::{debug, info};

/// Result of one [`FeedController::load_more`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The next page was appended.
    Loaded(usize),
    /// The source ran out and the first page was appended again.
    Wrapped(usize),
    /// The source ran out; pagination stopped.
    Exhausted,
    /// A load was already in flight, or there are no more pages.
    Skipped,
}

/// Ring drawn around a feed avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingStyle {
    /// At least one story is unseen.
    Unseen,
    /// Every story has been seen.
    AllSeen,
}

/// One entry of the rendered feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Avatar {
    pub user: User,
    pub story_count: usize,
    pub ring: RingStyle,
}

#[derive(Debug)]
struct FeedState {
    users: Vec<User>,
    cursor: usize,
    loading: bool,
    has_more: bool,
    selected: Option<UserId>,
    // Bumped by refresh so an in-flight load cannot append stale users.
    generation: u64,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            cursor: 0,
            loading: false,
            has_more: true,
            selected: None,
            generation: 0,
        }
    }
}

/// Owns the ordered user list and pagination cursor of the feed.
///
/// Users may appear more than once after a wrap; neighbor lookups use the
/// first occurrence of an id.
pub struct FeedController {
    source: Arc<dyn UserSource>,
    policy: ExhaustionPolicy,
    state: Mutex<FeedState>,
}

impl FeedController {
    pub fn new(source: Arc<dyn UserSource>, policy: ExhaustionPolicy) -> Self {
        Self {
            source,
            policy,
            state: Mutex::new(FeedState::default()),
        }
    }

    /// Fetches and appends the page at the cursor.
    pub fn load_more(&self) -> LoadOutcome {
        let (cursor, generation) = {
            let mut state = self.lock();
            if state.loading || !state.has_more {
                return LoadOutcome::Skipped;
            }
            state.loading = true;
            (state.cursor, state.generation)
        };

        let mut page = self.source.page(cursor);
        let mut wrapped = false;
        if page.is_empty() && self.policy == ExhaustionPolicy::Wrap && cursor > 0 {
            page = self.source.page(0);
            wrapped = true;
        }

        let mut state = self.lock();
        if state.generation != generation {
            debug!(cursor, "discarding page fetched before refresh");
            return LoadOutcome::Skipped;
        }
        state.loading = false;

        if page.is_empty() {
            state.has_more = false;
            info!(cursor, users = state.users.len(), "user source exhausted");
            return LoadOutcome::Exhausted;
        }

        let count = page.len();
        state.users.extend(page);
        if wrapped {
            state.cursor = 1;
            info!(users = count, "user source exhausted, wrapped to first page");
            LoadOutcome::Wrapped(count)
        } else {
            state.cursor = cursor + 1;
            debug!(page = cursor, users = count, "page loaded");
            LoadOutcome::Loaded(count)
        }
    }

    /// Drops every loaded user and loads the first page again.
    pub fn refresh(&self) -> LoadOutcome {
        {
            let mut state = self.lock();
            state.users.clear();
            state.cursor = 0;
            state.has_more = true;
            state.loading = false;
            state.generation += 1;
        }
        debug!("feed refreshed");
        self.load_more()
    }

    pub fn users(&self) -> Vec<User> {
        self.lock().users.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().users.is_empty()
    }

    pub fn has_more(&self) -> bool {
        self.lock().has_more
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    /// Page index the next `load_more` will fetch.
    pub fn cursor(&self) -> usize {
        self.lock().cursor
    }

    /// First loaded user with this id.
    pub fn user(&self, user_id: UserId) -> Option<User> {
        self.lock().users.iter().find(|u| u.id == user_id).cloned()
    }

    /// The user after the first occurrence of `after`.
    pub fn next_user(&self, after: UserId) -> Option<User> {
        let state = self.lock();
        let index = state.users.iter().position(|u| u.id == after)?;
        state.users.get(index + 1).cloned()
    }

    /// The user before the first occurrence of `before`.
    pub fn previous_user(&self, before: UserId) -> Option<User> {
        let state = self.lock();
        let index = state.users.iter().position(|u| u.id == before)?;
        index.checked_sub(1).map(|i| state.users[i].clone())
    }

    /// The feed as rendered: one avatar per loaded user.
    pub fn avatars(&self, story_state: &dyn StoryState) -> Vec<Avatar> {
        self.users()
            .into_iter()
            .map(|user| {
                let story_count = user.story_count();
                let ring = if story_state.has_unseen(user.id, story_count) {
                    RingStyle::Unseen
                } else {
                    RingStyle::AllSeen
                };
                Avatar {
                    user,
                    story_count,
                    ring,
                }
            })
            .collect()
    }

    /// Selects a loaded user, as tapping their avatar does.
    pub fn select(&self, user_id: UserId) -> Option<User> {
        let mut state = self.lock();
        let user = state.users.iter().find(|u| u.id == user_id).cloned()?;
        state.selected = Some(user_id);
        debug!(user_id = %user_id, "user selected");
        Some(user)
    }

    pub fn selected(&self) -> Option<UserId> {
        self.lock().selected
    }

    fn lock(&self) -> MutexGuard<'_, FeedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ViewerDelegate for FeedController {
    fn next_user(&self, current: &User) -> Option<User> {
        let next = FeedController::next_user(self, current.id)?;
        self.lock().selected = Some(next.id);
        Some(next)
    }

    fn previous_user(&self, current: &User) -> Option<User> {
        let previous = FeedController::previous_user(self, current.id)?;
        self.lock().selected = Some(previous.id);
        Some(previous)
    }

    fn dismissed(&self, user: &User) {
        debug!(user_id = %user.id, "viewer dismissed");
        self.lock().selected = None;
    }
}
