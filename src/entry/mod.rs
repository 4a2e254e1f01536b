//! Catalog entry data model
//!
//! An [`Entry`] describes one crawled catalog item. [`Books`] is the persisted
//! export record: the ranked output of a run, and the resume input of the next.

use serde::{Deserialize, Deserializer, Serialize};

/// One catalog item as extracted from its detail page
///
/// Every field defaults to its zero value when absent, both on extraction and
/// when loading a prior export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Entry {
    /// Display title
    pub title: String,

    /// Canonical URL the entry was fetched from (the Store key)
    pub url: String,

    /// Site-local identifier used to derive the similar-items page; may be empty
    pub id: String,

    /// Cover image URL
    pub cover_url: Option<String>,

    /// Contributor names in page order
    #[serde(deserialize_with = "null_as_empty")]
    pub authors: Vec<String>,

    /// Category tags
    #[serde(deserialize_with = "null_as_empty")]
    pub genres: Vec<String>,

    /// Average score
    pub rating: f64,

    /// Number of score contributions
    pub ratings: u64,

    /// Number of textual reviews
    pub reviews: u64,

    /// Numeric fields whose page text could not be parsed (and were zeroed)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unparsed: Vec<String>,
}

/// Reads a list that older exports may have written as `null`
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Entry {
    /// Assigns the URL the entry was fetched from
    ///
    /// The extractor never sees the URL of the page it parses; the crawler
    /// supplies it once the fetch has completed.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Whether neighbors can be derived for this entry
    pub fn is_expandable(&self) -> bool {
        !self.id.is_empty()
    }
}

/// Persisted export: an ordered list of entries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Books {
    #[serde(default)]
    pub books: Vec<Entry>,
}

impl Books {
    pub fn new(books: Vec<Entry>) -> Self {
        Self { books }
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
