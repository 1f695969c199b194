// SPDX-FileCopyrightText: 2026 Stories Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite connection management with PRAGMA setup, WAL mode, and migrations.
//!
//! A `Database` owns the only connection to its file. Every read and write
//! goes through [`Database::with_conn`], which serializes access.

use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use rusqlite::Connection;
use stories_config::SyncMode;
use stories_core::StoriesError;
use tracing::debug;

use crate::migrations::run_migrations;

/// A single SQLite connection with the schema migrated.
pub struct Database {
    conn: Mutex<Connection>,
    path: String,
}

impl Database {
    /// Opens (creating if needed) the database at `path` and runs migrations.
    ///
    /// Commits are fully synced unless `synchronous` is [`SyncMode::Normal`].
    pub fn open(path: &str, wal_mode: bool, synchronous: SyncMode) -> Result<Self, StoriesError> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(StoriesError::storage)?;
            }
        }

        let conn = Connection::open(path).map_err(StoriesError::storage)?;
        conn.busy_timeout(Duration::from_secs(5))
            .map_err(StoriesError::storage)?;
        if wal_mode {
            let mode: String = conn
                .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
                .map_err(StoriesError::storage)?;
            debug!(path, journal_mode = %mode, "configured journal mode");
        }
        let level = match synchronous {
            SyncMode::Full => "FULL",
            SyncMode::Normal => "NORMAL",
        };
        conn.pragma_update(None, "synchronous", level)
            .map_err(StoriesError::storage)?;

        Self::from_connection(conn, path.to_string())
    }

    /// Opens a private in-memory database, mostly for tests.
    pub fn open_in_memory() -> Result<Self, StoriesError> {
        let conn = Connection::open_in_memory().map_err(StoriesError::storage)?;
        Self::from_connection(conn, ":memory:".to_string())
    }

    fn from_connection(mut conn: Connection, path: String) -> Result<Self, StoriesError> {
        run_migrations(&mut conn)?;
        debug!(path = %path, "database ready");
        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    /// Location of the database file, or `:memory:`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Runs `f` with exclusive access to the connection.
    pub fn with_conn<T>(
        &self,
        f: impl FnOnce(&mut Connection) -> rusqlite::Result<T>,
    ) -> Result<T, StoriesError> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| StoriesError::Internal(format!("database lock poisoned: {e}")))?;
        f(&mut conn).map_err(StoriesError::storage)
    }
}
