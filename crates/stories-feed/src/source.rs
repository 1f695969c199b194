// SPDX-FileCopyrightText: 2026 Stories Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static paginated user dataset.

use std::path::Path;

use serde::Deserialize;
use stories_config::FeedConfig;
use stories_core::{StoriesError, User, UserSource};
use tracing::{debug, info};

/// Dataset compiled into the binary, used when no `dataset_path` is set.
const BUNDLED_DATASET: &str = include_str!("../data/users.json");

#[derive(Debug, Deserialize)]
struct Dataset {
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    users: Vec<User>,
}

/// A `UserSource` over a dataset parsed once at construction.
#[derive(Debug, Clone)]
pub struct StaticDataSource {
    pages: Vec<Vec<User>>,
}

impl StaticDataSource {
    /// The dataset shipped with the crate.
    pub fn bundled() -> Result<Self, StoriesError> {
        Self::from_json(BUNDLED_DATASET)
    }

    pub fn from_pages(pages: Vec<Vec<User>>) -> Self {
        Self { pages }
    }

    /// Parses a `{"pages":[{"users":[...]}]}` document.
    pub fn from_json(json: &str) -> Result<Self, StoriesError> {
        let dataset: Dataset = serde_json::from_str(json).map_err(|e| StoriesError::Dataset {
            message: "malformed user dataset".to_string(),
            source: Some(Box::new(e)),
        })?;
        let pages: Vec<Vec<User>> = dataset.pages.into_iter().map(|p| p.users).collect();
        debug!(
            pages = pages.len(),
            users = pages.iter().map(Vec::len).sum::<usize>(),
            "dataset parsed"
        );
        Ok(Self { pages })
    }

    /// Reads and parses a dataset file.
    pub fn from_path(path: &Path) -> Result<Self, StoriesError> {
        let json = std::fs::read_to_string(path).map_err(|e| StoriesError::Dataset {
            message: format!("cannot read {}", path.display()),
            source: Some(Box::new(e)),
        })?;
        Self::from_json(&json)
    }

    /// The configured dataset file if any, otherwise the bundled one.
    pub fn from_config(config: &FeedConfig) -> Result<Self, StoriesError> {
        match &config.dataset_path {
            Some(path) => {
                info!(path = %path, "loading user dataset");
                Self::from_path(Path::new(path))
            }
            None => Self::bundled(),
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

impl UserSource for StaticDataSource {
    fn page(&self, index: usize) -> Vec<User> {
        self.pages.get(index).cloned().unwrap_or_default()
    }
}
