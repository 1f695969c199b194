// SPDX-FileCopyrightText: 2026 Stories Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`StateStore`] implementation over any [`KvBackend`].

use std::collections::BTreeSet;
use std::sync::Arc;

use stories_config::model::{StorageBackend, StorageConfig};
use stories_core::{PersistedState, StateStore, StoriesError, StoryKey};
use tracing::{debug, info, warn};

use crate::codec::{decode_set, encode_set};
use crate::database::Database;
use crate::kv::{KvBackend, MemoryKv};

/// Persists the seen and liked sets under two fixed keys of a backend.
pub struct KvStateStore<B> {
    backend: B,
    seen_key: String,
    liked_key: String,
}

impl<B: KvBackend> KvStateStore<B> {
    pub fn new(backend: B, seen_key: impl Into<String>, liked_key: impl Into<String>) -> Self {
        Self {
            backend,
            seen_key: seen_key.into(),
            liked_key: liked_key.into(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn load_set(&self, key: &str) -> BTreeSet<StoryKey> {
        match self.backend.get(key) {
            Ok(None) => {
                debug!(key, "no persisted value, starting empty");
                BTreeSet::new()
            }
            Ok(Some(bytes)) => decode_set(key, &bytes).unwrap_or_else(|e| {
                warn!(key, error = %e, "persisted value is corrupt, starting empty");
                BTreeSet::new()
            }),
            Err(e) => {
                warn!(key, error = %e, "could not read persisted value, starting empty");
                BTreeSet::new()
            }
        }
    }
}

impl<B: KvBackend> StateStore for KvStateStore<B> {
    fn load(&self) -> PersistedState {
        PersistedState {
            seen: self.load_set(&self.seen_key),
            liked: self.load_set(&self.liked_key),
        }
    }

    fn save(&self, state: &PersistedState) -> Result<(), StoriesError> {
        let seen = encode_set(&state.seen)?;
        let liked = encode_set(&state.liked)?;
        self.backend
            .put_all(&[(self.seen_key.as_str(), seen), (self.liked_key.as_str(), liked)])
    }

    fn clear(&self) -> Result<(), StoriesError> {
        self.backend
            .delete_all(&[self.seen_key.as_str(), self.liked_key.as_str()])
    }
}

/// Opens the store selected by `config`.
pub fn open_state_store(config: &StorageConfig) -> Result<Arc<dyn StateStore>, StoriesError> {
    match config.backend {
        StorageBackend::Sqlite => {
            let db = Database::open(&config.database_path, config.wal_mode, config.synchronous)?;
            info!(path = %config.database_path, "using sqlite state store");
            Ok(Arc::new(KvStateStore::new(
                db,
                config.seen_key.clone(),
                config.liked_key.clone(),
            )))
        }
        StorageBackend::Memory => {
            info!("using in-memory state store, state will not survive restart");
            Ok(Arc::new(KvStateStore::new(
                MemoryKv::new(),
                config.seen_key.clone(),
                config.liked_key.clone(),
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use stories_config::SyncMode;
    use stories_core::UserId;
    use tracing_test::traced_test;

    use super::*;

    const SEEN: &str = "com.stories.seenStories";
    const LIKED: &str = "com.stories.likedStories";

    fn key(user: u64, index: usize) -> StoryKey {
        StoryKey::new(UserId(user), index)
    }

    fn sample_state() -> PersistedState {
        PersistedState {
            seen: [key(1, 0), key(1, 1), key(4, 2)].into_iter().collect(),
            liked: [key(1, 1)].into_iter().collect(),
        }
    }

    #[test]
    fn empty_backend_loads_empty_sets() {
        let store = KvStateStore::new(MemoryKv::new(), SEEN, LIKED);
        assert_eq!(store.load(), PersistedState::default());
    }

    #[test]
    fn save_then_load_from_fresh_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stories.db");
        let path = path.to_str().unwrap();

        let store = KvStateStore::new(Database::open(path, true, SyncMode::Full).unwrap(), SEEN, LIKED);
        store.save(&sample_state()).unwrap();
        drop(store);

        let reopened = KvStateStore::new(Database::open(path, true, SyncMode::Full).unwrap(), SEEN, LIKED);
        assert_eq!(reopened.load(), sample_state());
    }

    #[test]
    fn save_uses_the_configured_keys() {
        let store = KvStateStore::new(MemoryKv::new(), "seen", "liked");
        store.save(&sample_state()).unwrap();
        assert!(store.backend().get("seen").unwrap().is_some());
        assert!(store.backend().get("liked").unwrap().is_some());
        assert!(store.backend().get(SEEN).unwrap().is_none());
    }

    #[test]
    fn clear_removes_both_sets() {
        let store = KvStateStore::new(Database::open_in_memory().unwrap(), SEEN, LIKED);
        store.save(&sample_state()).unwrap();
        store.clear().unwrap();
        assert_eq!(store.load(), PersistedState::default());
    }

    #[test]
    #[traced_test]
    fn corrupt_blob_loads_empty_and_is_logged_as_corrupt() {
        let store = KvStateStore::new(MemoryKv::new(), SEEN, LIKED);
        store
            .backend()
            .put_all(&[(SEEN, b"not json".to_vec()), (LIKED, br#"["1-1"]"#.to_vec())])
            .unwrap();

        let state = store.load();
        assert!(state.seen.is_empty());
        assert_eq!(state.liked.len(), 1);
        assert!(logs_contain("persisted value is corrupt"));
    }

    #[test]
    #[traced_test]
    fn missing_blob_starts_empty_without_warning() {
        let store = KvStateStore::new(MemoryKv::new(), SEEN, LIKED);
        let _ = store.load();
        assert!(logs_contain("no persisted value"));
        assert!(!logs_contain("persisted value is corrupt"));
    }

    #[test]
    fn open_state_store_honors_backend_choice() {
        let config = StorageConfig {
            backend: StorageBackend::Memory,
            database_path: String::new(),
            ..StorageConfig::default()
        };
        let store = open_state_store(&config).unwrap();
        store.save(&sample_state()).unwrap();
        assert_eq!(store.load(), sample_state());
    }
}
