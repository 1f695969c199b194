// SPDX-FileCopyrightText: 2026 Stories Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! An open story viewer: a session plus the timer that drives it.

use std::sync::Arc;

use stories_config::PlaybackConfig;
use stories_core::{StoriesError, StoryState, User, ViewerDelegate};
use tokio::sync::Mutex;

use crate::playback::{blocking, PlaybackTimer};
use crate::session::{Transition, ViewerSession, ViewerSnapshot};

/// Full-screen viewer for one user's stories at a time.
///
/// Gestures lock the session, apply, and then restart or stop the timer
/// while still holding the lock, so a tick never interleaves with a user
/// change or a dismissal.
pub struct StoryViewer {
    session: Arc<Mutex<ViewerSession>>,
    timer: PlaybackTimer,
}

impl StoryViewer {
    /// Opens on `user`'s first story and starts playback.
    ///
    /// Must be called from within a tokio runtime.
    pub fn open(
        user: User,
        state: Arc<dyn StoryState>,
        delegate: Arc<dyn ViewerDelegate>,
        playback: &PlaybackConfig,
    ) -> Self {
        let mut session = ViewerSession::new(user, state, delegate, playback);
        session.start();
        let session = Arc::new(Mutex::new(session));
        let mut timer = PlaybackTimer::new(playback.tick_interval());
        timer.start(Arc::clone(&session));
        Self { session, timer }
    }

    pub async fn tap_next(&mut self) -> Transition {
        let mut session = self.session.lock().await;
        let transition = blocking(|| session.next());
        follow(&mut self.timer, &self.session, transition);
        transition
    }

    pub async fn tap_previous(&mut self) -> Transition {
        let mut session = self.session.lock().await;
        let transition = blocking(|| session.previous());
        follow(&mut self.timer, &self.session, transition);
        transition
    }

    pub async fn press(&mut self) -> Transition {
        self.session.lock().await.press()
    }

    pub async fn release(&mut self) -> Transition {
        self.session.lock().await.release()
    }

    pub async fn double_tap(&mut self) -> Option<bool> {
        let mut session = self.session.lock().await;
        blocking(|| session.double_tap())
    }

    pub async fn toggle_like(&mut self) -> Option<bool> {
        let mut session = self.session.lock().await;
        blocking(|| session.toggle_like())
    }

    pub async fn change_user(&mut self, user: User) -> Transition {
        let mut session = self.session.lock().await;
        let transition = blocking(|| session.change_user(user));
        follow(&mut self.timer, &self.session, transition);
        transition
    }

    pub async fn dismiss(&mut self) -> Transition {
        let mut session = self.session.lock().await;
        let transition = session.dismiss();
        // Even a repeated dismiss must leave the timer stopped.
        self.timer.cancel();
        drop(session);
        transition
    }

    pub async fn send_message(&self, text: &str) -> Result<(), StoriesError> {
        self.session.lock().await.send_message(text)
    }

    pub async fn snapshot(&self) -> ViewerSnapshot {
        self.session.lock().await.snapshot()
    }

    /// True while the playback timer task is alive.
    pub fn is_ticking(&self) -> bool {
        self.timer.is_running()
    }
}

/// A new story or user plays from a fresh interval.
fn follow(timer: &mut PlaybackTimer, session: &Arc<Mutex<ViewerSession>>, transition: Transition) {
    match transition {
        Transition::Story { .. } | Transition::UserChanged { .. } => {
            timer.start(Arc::clone(session))
        }
        Transition::Dismissed => timer.cancel(),
        _ => {}
    }
}
