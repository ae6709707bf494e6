//! # Storage Layer
//!
//! The [`KeyValueStore`] trait is the persistence boundary for vocadrill.
//! Every manager serializes its whole slice of state to JSON and writes it
//! under one fixed key; the key sets are disjoint, so managers never step on
//! each other (see [`keys`]).
//!
//! Storage is abstracted behind a trait to:
//! - Enable **testing** with `InMemoryStore` (no filesystem needed)
//! - Allow **future backends** without changing manager logic
//! - Keep the bookkeeping model **decoupled** from persistence details
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production backend, one `<key>.json` file per key
//!   under the data directory
//! - [`memory::InMemoryStore`]: map-backed store for tests, no persistence
//!
//! ## Failure semantics
//!
//! Reads that find nothing return `Ok(None)`; managers treat that (and
//! corrupt blobs) as "no data yet" and fall back to defaults. Writes are
//! fallible, but a failed write never rolls back the in-memory mutation
//! that preceded it.

use crate::error::Result;

pub mod fs;
pub mod memory;

/// Fixed key names, one serialized blob each. Each manager owns a disjoint
/// subset of these.
pub mod keys {
    /// Serialized `UserProgress`.
    pub const PROGRESS: &str = "learning_progress";
    /// Serialized list of `CustomWord`.
    pub const CUSTOM_VOCABULARY: &str = "custom_vocabulary";
    /// Serialized `AppSettings`.
    pub const SETTINGS: &str = "app_settings";
    /// Serialized list of `BackupEntry`, capped at 10, newest first.
    pub const BACKUP_HISTORY: &str = "backup_history";

    pub const ALL: [&str; 4] = [PROGRESS, CUSTOM_VOCABULARY, SETTINGS, BACKUP_HISTORY];
}

/// Abstract interface for the string-keyed local store.
pub trait KeyValueStore {
    /// Read the value stored under `key`, or `None` if absent.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any prior value.
    fn write(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key` if present. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;

    /// All `(key, value)` pairs currently persisted. Used for storage
    /// usage estimation.
    fn entries(&self) -> Result<Vec<(String, String)>>;
}
