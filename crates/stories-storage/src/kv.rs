// SPDX-FileCopyrightText: 2026 Stories Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Raw key-value backends underneath the state store.

use std::collections::HashMap;
use std::sync::Mutex;

use rusqlite::{params, OptionalExtension};
use stories_core::StoriesError;

use crate::database::Database;

/// A byte-oriented key-value backend.
///
/// `put_all` and `delete_all` are atomic: either every entry is applied or
/// none is.
pub trait KvBackend: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoriesError>;

    fn put_all(&self, entries: &[(&str, Vec<u8>)]) -> Result<(), StoriesError>;

    fn delete_all(&self, keys: &[&str]) -> Result<(), StoriesError>;
}

impl KvBackend for Database {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoriesError> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
        })
    }

    fn put_all(&self, entries: &[(&str, Vec<u8>)]) -> Result<(), StoriesError> {
        let now = chrono::Utc::now().to_rfc3339();
        self.with_conn(|conn| {
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare(
                    "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                )?;
                for (key, value) in entries {
                    stmt.execute(params![key, value, now])?;
                }
            }
            tx.commit()
        })
    }

    fn delete_all(&self, keys: &[&str]) -> Result<(), StoriesError> {
        self.with_conn(|conn| {
            let tx = conn.transaction()?;
            for key in keys {
                tx.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
            }
            tx.commit()
        })
    }
}

/// Process-local backend. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>>, StoriesError> {
        self.entries
            .lock()
            .map_err(|e| StoriesError::Internal(format!("memory store lock poisoned: {e}")))
    }
}

impl KvBackend for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoriesError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn put_all(&self, entries: &[(&str, Vec<u8>)]) -> Result<(), StoriesError> {
        let mut map = self.entries()?;
        for (key, value) in entries {
            map.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }

    fn delete_all(&self, keys: &[&str]) -> Result<(), StoriesError> {
        let mut map = self.entries()?;
        for key in keys {
            map.remove(*key);
        }
        Ok(())
    }
}
