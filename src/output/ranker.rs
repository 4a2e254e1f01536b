//! Ranking of accepted entries for the export

use crate::entry::Entry;
use crate::output::filter::AcceptanceFilter;
use crate::storage::Storage;

/// Produces the ranked export sequence from a store
///
/// Keeps only accepted entries and orders them by number of ratings,
/// highest first. Entries are ordered by URL before the stable sort so ties
/// come out the same way on every run.
pub fn rank(storage: &dyn Storage, filter: &AcceptanceFilter) -> Vec<Entry> {
    let mut ranked: Vec<Entry> = storage
        .all_entries()
        .into_iter()
        .filter(|entry| filter.accepts(entry))
        .collect();

    ranked.sort_by(|a, b| a.url.cmp(&b.url));
    ranked.sort_by(|a, b| b.ratings.cmp(&a.ratings));
    ranked
}
