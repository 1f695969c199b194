// SPDX-FileCopyrightText: 2026 Stories Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Synchronous story viewer state machine.
//!
//! A [`ViewerSession`] knows nothing about time: the playback timer feeds it
//! [`ViewerSession::tick`] calls and user gestures arrive as plain method
//! calls. Every operation reports what changed as a [`Transition`].

use std::sync::Arc;

use stories_config::{BoundaryPolicy, PlaybackConfig};
use stories_core::{StoriesError, Story, StoryState, User, UserId, ViewerDelegate};
use tracing::{debug, info, warn};

/// Lifecycle phase of a viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Paused,
    /// Terminal; every later event is ignored.
    Dismissed,
}

/// What an operation did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Nothing observable changed.
    None,
    /// Progress of the current story advanced.
    Progressed,
    /// Another story of the same user is now showing.
    Story { index: usize },
    /// The viewer switched to a different user, starting at story 0.
    UserChanged { user_id: UserId },
    /// There was no user to move to and the viewer stayed put.
    NoNeighbor,
    /// The viewer closed.
    Dismissed,
}

/// Plain data describing what the viewer shows right now.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerSnapshot {
    pub user: User,
    pub story_index: usize,
    pub story_count: usize,
    pub progress: f64,
    pub paused: bool,
    pub liked: bool,
    pub image_url: String,
    /// Fill of each progress segment, one per story.
    pub segments: Vec<f64>,
    pub phase: Phase,
}

/// Transient playback state of one open viewer.
pub struct ViewerSession {
    user: User,
    story: Story,
    state: Arc<dyn StoryState>,
    delegate: Arc<dyn ViewerDelegate>,
    ticks_per_story: u32,
    at_boundary: BoundaryPolicy,
    current_index: usize,
    elapsed_ticks: u32,
    paused: bool,
    dismissed: bool,
}

impl ViewerSession {
    /// Creates a session positioned on the first story of `user`.
    ///
    /// Nothing is marked seen until [`start`](Self::start) runs.
    pub fn new(
        user: User,
        state: Arc<dyn StoryState>,
        delegate: Arc<dyn ViewerDelegate>,
        playback: &PlaybackConfig,
    ) -> Self {
        let story = Story::for_user(&user);
        Self {
            user,
            story,
            state,
            delegate,
            ticks_per_story: playback.ticks_per_story(),
            at_boundary: playback.at_boundary,
            current_index: 0,
            elapsed_ticks: 0,
            paused: false,
            dismissed: false,
        }
    }

    /// Marks the current story seen; called once per user shown.
    pub fn start(&mut self) -> Transition {
        if self.dismissed {
            return Transition::None;
        }
        info!(user_id = %self.user.id, stories = self.story.len(), "viewer started");
        self.mark_current_seen();
        Transition::Story {
            index: self.current_index,
        }
    }

    /// One timer period elapsed.
    pub fn tick(&mut self) -> Transition {
        if self.dismissed || self.paused {
            return Transition::None;
        }
        self.elapsed_ticks += 1;
        if self.elapsed_ticks < self.ticks_per_story {
            return Transition::Progressed;
        }
        self.elapsed_ticks = 0;
        self.next()
    }

    /// Advances to the next story, or asks the delegate for the next user.
    pub fn next(&mut self) -> Transition {
        if self.dismissed {
            return Transition::None;
        }
        if self.current_index + 1 < self.story.len() {
            self.show(self.current_index + 1);
            self.mark_current_seen();
            return Transition::Story {
                index: self.current_index,
            };
        }
        match self.delegate.next_user(&self.user) {
            Some(user) => self.change_user(user),
            None => self.at_edge(),
        }
    }

    /// Goes back one story, or asks the delegate for the previous user.
    pub fn previous(&mut self) -> Transition {
        if self.dismissed {
            return Transition::None;
        }
        if self.current_index > 0 {
            self.show(self.current_index - 1);
            return Transition::Story {
                index: self.current_index,
            };
        }
        match self.delegate.previous_user(&self.user) {
            Some(user) => self.change_user(user),
            None => self.at_edge(),
        }
    }

    /// Long press started: hold the current story.
    pub fn press(&mut self) -> Transition {
        if self.dismissed || self.paused {
            return Transition::None;
        }
        self.paused = true;
        debug!(user_id = %self.user.id, index = self.current_index, "playback paused");
        Transition::None
    }

    /// Long press ended: resume playback.
    pub fn release(&mut self) -> Transition {
        if self.dismissed || !self.paused {
            return Transition::None;
        }
        self.paused = false;
        debug!(user_id = %self.user.id, index = self.current_index, "playback resumed");
        Transition::None
    }

    /// Double press: likes the current story; never unlikes.
    ///
    /// Returns the liked flag afterwards, or `None` once dismissed.
    pub fn double_tap(&mut self) -> Option<bool> {
        if self.dismissed {
            return None;
        }
        if self.state.is_liked(self.user.id, self.current_index) {
            return Some(true);
        }
        Some(self.flip_like())
    }

    /// The like control: flips the liked flag of the current story.
    pub fn toggle_like(&mut self) -> Option<bool> {
        if self.dismissed {
            return None;
        }
        Some(self.flip_like())
    }

    /// Switches to `user` and starts again from their first story.
    pub fn change_user(&mut self, user: User) -> Transition {
        if self.dismissed {
            return Transition::None;
        }
        debug!(from = %self.user.id, to = %user.id, "switching user");
        self.story = Story::for_user(&user);
        self.user = user;
        self.current_index = 0;
        self.elapsed_ticks = 0;
        self.paused = false;
        self.start();
        Transition::UserChanged {
            user_id: self.user.id,
        }
    }

    /// Closes the viewer and notifies the delegate once.
    pub fn dismiss(&mut self) -> Transition {
        if self.dismissed {
            return Transition::None;
        }
        self.dismissed = true;
        info!(user_id = %self.user.id, index = self.current_index, "viewer dismissed");
        self.delegate.dismissed(&self.user);
        Transition::Dismissed
    }

    /// The reply field has no backend.
    pub fn send_message(&self, text: &str) -> Result<(), StoriesError> {
        debug!(user_id = %self.user.id, len = text.len(), "message discarded");
        Err(StoriesError::Unsupported("message sending"))
    }

    pub fn snapshot(&self) -> ViewerSnapshot {
        let progress = self.progress();
        let segments = (0..self.story.len())
            .map(|index| match index.cmp(&self.current_index) {
                std::cmp::Ordering::Less => 1.0,
                std::cmp::Ordering::Equal => progress,
                std::cmp::Ordering::Greater => 0.0,
            })
            .collect();
        ViewerSnapshot {
            user: self.user.clone(),
            story_index: self.current_index,
            story_count: self.story.len(),
            progress,
            paused: self.paused,
            liked: self.state.is_liked(self.user.id, self.current_index),
            image_url: self
                .story
                .image_urls
                .get(self.current_index)
                .cloned()
                .unwrap_or_default(),
            segments,
            phase: self.phase(),
        }
    }

    pub fn phase(&self) -> Phase {
        if self.dismissed {
            Phase::Dismissed
        } else if self.paused {
            Phase::Paused
        } else {
            Phase::Playing
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Fraction of the current story already shown, in `[0, 1)`.
    pub fn progress(&self) -> f64 {
        f64::from(self.elapsed_ticks) / f64::from(self.ticks_per_story)
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }

    fn show(&mut self, index: usize) {
        self.current_index = index;
        self.elapsed_ticks = 0;
        debug!(user_id = %self.user.id, index, "showing story");
    }

    fn at_edge(&mut self) -> Transition {
        match self.at_boundary {
            BoundaryPolicy::Stay => {
                debug!(user_id = %self.user.id, "no neighboring user");
                Transition::NoNeighbor
            }
            BoundaryPolicy::Dismiss => self.dismiss(),
        }
    }

    fn mark_current_seen(&self) {
        // Seen state stays correct in memory even if the write fails.
        if let Err(e) = self.state.mark_seen(self.user.id, self.current_index) {
            warn!(user_id = %self.user.id, index = self.current_index, error = %e, "could not persist seen story");
        }
    }

    fn flip_like(&self) -> bool {
        match self.state.toggle_liked(self.user.id, self.current_index) {
            Ok(liked) => liked,
            Err(e) => {
                warn!(user_id = %self.user.id, index = self.current_index, error = %e, "could not persist like");
                self.state.is_liked(self.user.id, self.current_index)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use stories_test_utils::{user, users, DelegateCall, MockStoryState, RecordingDelegate};

    use super::*;

    /// One second per story at 100 ms ticks: ten ticks per story.
    fn playback(at_boundary: BoundaryPolicy) -> PlaybackConfig {
        PlaybackConfig {
            story_duration_secs: 1.0,
            tick_interval_ms: 100,
            at_boundary,
        }
    }

    struct Fixture {
        state: Arc<MockStoryState>,
        delegate: Arc<RecordingDelegate>,
        session: ViewerSession,
    }

    // Users 3, 4, 5 have 3, 4 and 5 stories.
    fn fixture(start: u64, at_boundary: BoundaryPolicy) -> Fixture {
        let state = Arc::new(MockStoryState::new());
        let delegate = Arc::new(RecordingDelegate::with_order(users(3..=5)));
        let mut session = ViewerSession::new(
            user(start),
            state.clone(),
            delegate.clone(),
            &playback(at_boundary),
        );
        session.start();
        Fixture {
            state,
            delegate,
            session,
        }
    }

    fn ticks(session: &mut ViewerSession, n: usize) -> Vec<Transition> {
        (0..n).map(|_| session.tick()).collect()
    }

    #[test]
    fn start_marks_first_story_seen() {
        let f = fixture(3, BoundaryPolicy::Stay);
        assert_eq!(f.state.seen_indexes(UserId(3)), vec![0]);
        assert_eq!(f.session.current_index(), 0);
        assert_eq!(f.session.phase(), Phase::Playing);
    }

    #[test]
    fn story_advances_after_exactly_ticks_per_story() {
        let mut f = fixture(3, BoundaryPolicy::Stay);
        let transitions = ticks(&mut f.session, 9);
        assert!(transitions.iter().all(|t| *t == Transition::Progressed));
        assert!((f.session.progress() - 0.9).abs() < 1e-9);

        assert_eq!(f.session.tick(), Transition::Story { index: 1 });
        assert_eq!(f.session.progress(), 0.0);
        assert_eq!(f.state.seen_indexes(UserId(3)), vec![0, 1]);
    }

    #[test]
    fn default_playback_takes_150_ticks() {
        let state = Arc::new(MockStoryState::new());
        let delegate = Arc::new(RecordingDelegate::new());
        let mut session =
            ViewerSession::new(user(3), state, delegate, &PlaybackConfig::default());
        session.start();
        let transitions = ticks(&mut session, 150);
        assert_eq!(transitions[148], Transition::Progressed);
        assert_eq!(transitions[149], Transition::Story { index: 1 });
    }

    #[test]
    fn next_on_last_story_changes_to_delegate_user() {
        let mut f = fixture(3, BoundaryPolicy::Stay);
        f.session.next();
        f.session.next();
        assert_eq!(f.session.current_index(), 2);

        assert_eq!(
            f.session.next(),
            Transition::UserChanged { user_id: UserId(4) }
        );
        assert_eq!(f.session.user().id, UserId(4));
        assert_eq!(f.session.current_index(), 0);
        assert_eq!(f.state.seen_indexes(UserId(4)), vec![0]);
        assert_eq!(f.delegate.calls(), vec![DelegateCall::NextUser(UserId(3))]);
    }

    #[test]
    fn auto_advance_past_last_story_changes_user() {
        let mut f = fixture(3, BoundaryPolicy::Stay);
        let transitions = ticks(&mut f.session, 30);
        assert_eq!(
            transitions[29],
            Transition::UserChanged { user_id: UserId(4) }
        );
        assert_eq!(f.state.seen_indexes(UserId(3)), vec![0, 1, 2]);
    }

    #[test]
    fn last_user_with_stay_policy_keeps_viewer_open() {
        let mut f = fixture(5, BoundaryPolicy::Stay);
        for _ in 0..4 {
            f.session.next();
        }
        assert_eq!(f.session.next(), Transition::NoNeighbor);
        assert_eq!(f.session.current_index(), 4);
        assert_eq!(f.session.phase(), Phase::Playing);
    }

    #[test]
    fn last_user_with_dismiss_policy_closes_viewer() {
        let mut f = fixture(5, BoundaryPolicy::Dismiss);
        for _ in 0..4 {
            f.session.next();
        }
        assert_eq!(f.session.next(), Transition::Dismissed);
        assert!(f.session.is_dismissed());
        assert_eq!(
            f.delegate.calls().last(),
            Some(&DelegateCall::Dismissed(UserId(5)))
        );
    }

    #[test]
    fn previous_steps_back_without_remarking() {
        let mut f = fixture(4, BoundaryPolicy::Stay);
        f.session.next();
        f.session.next();
        for _ in 0..4 {
            f.session.tick();
        }
        assert_eq!(f.session.previous(), Transition::Story { index: 1 });
        assert_eq!(f.session.progress(), 0.0);
        assert_eq!(f.state.seen_indexes(UserId(4)), vec![0, 1, 2]);
    }

    #[test]
    fn previous_on_first_story_changes_to_previous_user() {
        let mut f = fixture(4, BoundaryPolicy::Stay);
        assert_eq!(
            f.session.previous(),
            Transition::UserChanged { user_id: UserId(3) }
        );
        assert_eq!(f.session.current_index(), 0);
        assert_eq!(f.delegate.calls(), vec![DelegateCall::PreviousUser(UserId(4))]);
    }

    #[test]
    fn previous_on_first_user_is_no_neighbor() {
        let mut f = fixture(3, BoundaryPolicy::Stay);
        assert_eq!(f.session.previous(), Transition::NoNeighbor);
        assert_eq!(f.session.user().id, UserId(3));
        assert_eq!(f.session.current_index(), 0);
        assert_eq!(f.delegate.calls(), vec![DelegateCall::PreviousUser(UserId(3))]);
    }

    #[test]
    fn pause_freezes_progress() {
        let mut f = fixture(3, BoundaryPolicy::Stay);
        ticks(&mut f.session, 3);
        f.session.press();
        assert_eq!(f.session.phase(), Phase::Paused);
        assert!(ticks(&mut f.session, 50)
            .iter()
            .all(|t| *t == Transition::None));
        assert!((f.session.progress() - 0.3).abs() < 1e-9);

        f.session.release();
        assert_eq!(f.session.tick(), Transition::Progressed);
        assert!((f.session.progress() - 0.4).abs() < 1e-9);
    }

    #[test]
    fn double_tap_only_likes() {
        let mut f = fixture(3, BoundaryPolicy::Stay);
        assert_eq!(f.session.double_tap(), Some(true));
        assert_eq!(f.session.double_tap(), Some(true));
        assert!(f.state.is_liked(UserId(3), 0));
        assert_eq!(
            f.state
                .calls()
                .iter()
                .filter(|c| matches!(c, stories_test_utils::StateCall::ToggleLiked(_)))
                .count(),
            1
        );
    }

    #[test]
    fn like_control_toggles() {
        let mut f = fixture(3, BoundaryPolicy::Stay);
        assert_eq!(f.session.toggle_like(), Some(true));
        assert!(f.session.snapshot().liked);
        assert_eq!(f.session.toggle_like(), Some(false));
        assert!(!f.state.is_liked(UserId(3), 0));
    }

    #[test]
    fn user_change_resets_pause_and_progress() {
        let mut f = fixture(3, BoundaryPolicy::Stay);
        ticks(&mut f.session, 5);
        f.session.press();
        f.session.change_user(user(5));
        let snapshot = f.session.snapshot();
        assert_eq!(snapshot.story_index, 0);
        assert_eq!(snapshot.progress, 0.0);
        assert!(!snapshot.paused);
        assert_eq!(snapshot.story_count, 5);
    }

    #[test]
    fn dismissed_session_ignores_everything() {
        let mut f = fixture(4, BoundaryPolicy::Stay);
        assert_eq!(f.session.dismiss(), Transition::Dismissed);
        let seen_before = f.state.calls().len();

        assert_eq!(f.session.tick(), Transition::None);
        assert_eq!(f.session.next(), Transition::None);
        assert_eq!(f.session.previous(), Transition::None);
        assert_eq!(f.session.press(), Transition::None);
        assert_eq!(f.session.double_tap(), None);
        assert_eq!(f.session.toggle_like(), None);
        assert_eq!(f.session.change_user(user(3)), Transition::None);
        assert_eq!(f.session.dismiss(), Transition::None);

        assert_eq!(f.state.calls().len(), seen_before);
        let dismissals = f
            .delegate
            .calls()
            .into_iter()
            .filter(|c| matches!(c, DelegateCall::Dismissed(_)))
            .count();
        assert_eq!(dismissals, 1);
    }

    #[test]
    fn send_message_is_unsupported() {
        let f = fixture(3, BoundaryPolicy::Stay);
        let err = f.session.send_message("nice").unwrap_err();
        assert!(matches!(err, StoriesError::Unsupported(_)));
    }

    #[test]
    fn snapshot_segments_fill_left_to_right() {
        let mut f = fixture(4, BoundaryPolicy::Stay);
        f.session.next();
        ticks(&mut f.session, 5);
        let snapshot = f.session.snapshot();
        assert_eq!(snapshot.segments, vec![1.0, 0.5, 0.0, 0.0]);
        assert_eq!(
            snapshot.image_url,
            "https://picsum.photos/seed/4-1/1080/1920"
        );
    }
}
