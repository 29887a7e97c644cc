//! Durable key-value slots for per-view UI state.
//!
//! Filter sets, sort specs, view mode and the last-sync timestamp are each
//! persisted under their own slot. The store is injected as a trait object
//! so tests can run against the in-memory implementation.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use thiserror::Error;

/// Errors for key-value storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Trait for durable key-value storage.
///
/// Values are plain strings; callers own the encoding (JSON for filter
/// sets, decimal strings for timestamps). Read/write failures are never
/// fatal to the caller - state simply stays in memory.
pub trait KeyValueStore: Send + Sync {
    /// Read a slot. `Ok(None)` means the slot was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a slot, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a slot entirely.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
