// SPDX-FileCopyrightText: 2026 Stories Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Stories feed.

use thiserror::Error;

/// The primary error type used across the Stories crates.
///
/// Reaching the first or last user while navigating is not an error; it is
/// reported as a normal transition by the viewer.
#[derive(Debug, Error)]
pub enum StoriesError {
    /// Persistence backend errors (open, write, transaction failure).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A persisted value exists but could not be decoded.
    #[error("could not decode `{key}`: {message}")]
    Decode { key: String, message: String },

    /// The user dataset could not be read or parsed.
    #[error("dataset error: {message}")]
    Dataset {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The requested action exists in the UI but has no backing implementation.
    #[error("{0} is not supported")]
    Unsupported(&'static str),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl StoriesError {
    /// Wraps any backend error as [`StoriesError::Storage`].
    pub fn storage(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        StoriesError::Storage {
            source: source.into(),
        }
    }
}
