// SPDX-FileCopyrightText: 2026 Stories Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wiring shared by every subcommand.

use std::sync::Arc;

use stories_config::StoriesConfig;
use stories_core::{StoriesError, ViewerDelegate};
use stories_feed::{Avatar, FeedController, StaticDataSource};
use stories_state::StoryStateManager;
use stories_storage::open_state_store;
use stories_viewer::StoryViewer;
use tracing::warn;

/// The state manager and feed built from one configuration.
pub struct App {
    pub config: StoriesConfig,
    pub state: Arc<StoryStateManager>,
    pub feed: Arc<FeedController>,
}

impl App {
    /// Opens persistence and the user dataset.
    ///
    /// A broken dataset leaves the feed empty; a broken store is an error.
    pub fn open(config: StoriesConfig) -> Result<Self, StoriesError> {
        let store = open_state_store(&config.storage)?;
        let state = Arc::new(StoryStateManager::new(store));

        let source = StaticDataSource::from_config(&config.feed).unwrap_or_else(|e| {
            warn!(error = %e, "user dataset unavailable, feed will be empty");
            StaticDataSource::from_pages(Vec::new())
        });
        let feed = Arc::new(FeedController::new(
            Arc::new(source),
            config.feed.on_exhausted,
        ));

        Ok(Self {
            config,
            state,
            feed,
        })
    }

    pub fn avatars(&self) -> Vec<Avatar> {
        self.feed.avatars(self.state.as_ref())
    }

    /// Opens a viewer on a loaded user, selecting them in the feed.
    ///
    /// Must be called from within a tokio runtime.
    pub fn open_viewer(&self, user_id: stories_core::UserId) -> Option<StoryViewer> {
        let user = self.feed.select(user_id)?;
        let delegate: Arc<dyn ViewerDelegate> = self.feed.clone();
        Some(StoryViewer::open(
            user,
            self.state.clone(),
            delegate,
            &self.config.playback,
        ))
    }
}
