//! Acceptance filter applied before expansion and export

use crate::config::FilterConfig;
use crate::entry::Entry;

/// Predicate deciding whether an entry is expanded and exported
///
/// Rejected entries stay in the store so a resumed run does not fetch them
/// again, but they are never expanded and never exported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcceptanceFilter {
    pub min_ratings: u64,
    pub min_rating: f64,
    pub ascii_title: bool,
}

impl AcceptanceFilter {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            min_ratings: config.min_ratings,
            min_rating: config.min_rating,
            ascii_title: config.ascii_title,
        }
    }

    /// Whether `entry` passes every threshold
    pub fn accepts(&self, entry: &Entry) -> bool {
        let title_ok = !self.ascii_title || is_ascii_title(&entry.title);
        title_ok && entry.ratings >= self.min_ratings && entry.rating >= self.min_rating
    }
}

impl Default for AcceptanceFilter {
    fn default() -> Self {
        Self::new(&FilterConfig::default())
    }
}

/// Titles with any character above U+007F are treated as out of language
pub fn is_ascii_title(title: &str) -> bool {
    title.chars().all(|c| (c as u32) <= 127)
}
