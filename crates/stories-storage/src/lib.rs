// SPDX-FileCopyrightText: 2026 Stories Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence of the seen and liked story sets.
//!
//! Each set is stored as a JSON array of story-key strings under a fixed key
//! of a key-value backend: a migrated SQLite table for real use, or a
//! process-local map. Loading never fails; saving is durable before it returns.

pub mod codec;
pub mod database;
pub mod kv;
pub mod migrations;
pub mod store;

pub use database::Database;
pub use kv::{KvBackend, MemoryKv};
pub use store::{open_state_store, KvStateStore};
pub use stories_config::SyncMode;
