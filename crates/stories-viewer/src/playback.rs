// SPDX-FileCopyrightText: 2026 Stories Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Periodic tick driver for a [`ViewerSession`].

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::session::{Transition, ViewerSession};

/// Owns the background task that ticks a session.
///
/// At most one task runs per timer; starting again cancels the previous one.
/// The task re-checks its token after taking the session lock, so once
/// `cancel` returns under that lock no further tick reaches the session.
pub struct PlaybackTimer {
    period: Duration,
    cancel: Option<CancellationToken>,
    task: Option<JoinHandle<()>>,
}

impl PlaybackTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            cancel: None,
            task: None,
        }
    }

    /// Starts ticking `session` every period. Must run inside a tokio runtime.
    pub fn start(&mut self, session: Arc<Mutex<ViewerSession>>) {
        self.cancel();
        let token = CancellationToken::new();
        self.task = Some(tokio::spawn(run(session, self.period, token.clone())));
        self.cancel = Some(token);
    }

    pub fn cancel(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
        self.task = None;
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for PlaybackTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn run(session: Arc<Mutex<ViewerSession>>, period: Duration, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(period);
    // The first tick completes immediately.
    interval.tick().await;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {
                let mut session = session.lock().await;
                if cancel.is_cancelled() {
                    break;
                }
                match blocking(|| session.tick()) {
                    Transition::UserChanged { .. } => interval.reset(),
                    Transition::Dismissed => break,
                    _ => {}
                }
            }
        }
    }
    debug!("playback timer stopped");
}

/// Runs `f`, which may write through to disk, without stalling other tasks
/// on a multi-threaded runtime. `block_in_place` panics on a current-thread
/// runtime, where `f` runs inline instead.
pub(crate) fn blocking<T>(f: impl FnOnce() -> T) -> T {
    match Handle::try_current().map(|handle| handle.runtime_flavor()) {
        Ok(RuntimeFlavor::MultiThread) => tokio::task::block_in_place(f),
        _ => f(),
    }
}
