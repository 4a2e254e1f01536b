//! Storage traits and error types
//!
//! This module defines the trait interface for entry stores and
//! associated error types.

use crate::entry::Entry;
use thiserror::Error;

/// Errors that can occur while loading persisted state
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to deserialize export: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Mapping from canonical URL to [`Entry`]
///
/// A store only grows during a run. Membership doubles as the visited set:
/// an entry is visited once it has been merged, whether or not it is later
/// accepted for export.
pub trait Storage {
    /// Gets the entry stored under `url`
    fn get(&self, url: &str) -> Option<&Entry>;

    /// Inserts or overwrites the entry stored under `url`
    ///
    /// The last writer wins. The crawler schedules each URL at most once per
    /// run, so overwrites do not happen in practice.
    fn merge(&mut self, url: &str, entry: Entry);

    /// Whether `url` has already been visited
    fn contains(&self, url: &str) -> bool {
        self.get(url).is_some()
    }

    /// Unordered snapshot of every stored entry
    fn all_entries(&self) -> Vec<Entry>;

    /// Number of stored entries
    fn len(&self) -> usize;

    /// Whether the store holds no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
