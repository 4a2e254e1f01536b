//! Storage module for crawled entries
//!
//! This module handles the entry store used during a crawl, including:
//! - The URL-keyed store that doubles as the visited set
//! - Reconstructing a store from a previous export for resumed runs

mod memory;
mod traits;

pub use memory::MemoryStorage;
pub use traits::{Storage, StorageError, StorageResult};

use std::path::Path;

/// Loads a store from an export file on disk
///
/// # Arguments
///
/// * `path` - Path to a JSON export produced by an earlier run
///
/// # Returns
///
/// * `Ok(MemoryStorage)` - Store keyed by each exported entry's URL
/// * `Err(StorageError)` - The file could not be read or deserialized
pub fn open_export(path: &Path) -> StorageResult<MemoryStorage> {
    let content = std::fs::read_to_string(path)?;
    MemoryStorage::load_export(&content)
}

/// Loads a store for a resumed run, falling back to an empty one
///
/// A missing or unreadable resume file is not fatal: the run proceeds as a
/// fresh crawl.
pub fn open_export_or_empty(path: &Path) -> MemoryStorage {
    match open_export(path) {
        Ok(storage) => {
            tracing::info!(
                "Loaded {} entries from {}",
                storage.len(),
                path.display()
            );
            storage
        }
        Err(e) => {
            tracing::warn!(
                "Failed to load resume file {}: {}; starting with an empty store",
                path.display(),
                e
            );
            MemoryStorage::new()
        }
    }
}
