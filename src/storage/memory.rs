//! In-memory entry store keyed by URL

use crate::entry::{Books, Entry};
use crate::storage::traits::{Storage, StorageResult};
use std::collections::HashMap;

/// In-memory entry store keyed by URL
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, Entry>,
}

impl MemoryStorage {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconstructs a store from a previously produced export
    ///
    /// Entries are keyed by their own `url` field. Entries without a URL
    /// cannot be addressed and are skipped.
    pub fn from_books(books: Books) -> Self {
        let mut storage = Self::new();
        for entry in books.books {
            if entry.url.is_empty() {
                tracing::debug!("Skipping exported entry without URL: {}", entry.title);
                continue;
            }
            let url = entry.url.clone();
            storage.merge(&url, entry);
        }
        storage
    }

    /// Parses a serialized export and loads it
    pub fn load_export(serialized: &str) -> StorageResult<Self> {
        let books: Books = serde_json::from_str(serialized)?;
        Ok(Self::from_books(books))
    }
}

impl Storage for MemoryStorage {
    fn get(&self, url: &str) -> Option<&Entry> {
        self.entries.get(url)
    }

    fn merge(&mut self, url: &str, entry: Entry) {
        self.entries.insert(url.to_string(), entry);
    }

    fn all_entries(&self) -> Vec<Entry> {
        self.entries.values().cloned().collect()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
