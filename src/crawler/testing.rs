//! In-memory fetcher and extractor used by the crawler's unit tests

use crate::crawler::extractor::Extractor;
use crate::crawler::fetcher::Fetcher;
use crate::entry::Entry;
use crate::{ExtractError, FetchError};
use futures::future::BoxFuture;
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Serves canned bodies and records every fetch
#[derive(Default)]
pub(crate) struct FakeSite {
    pages: HashMap<String, String>,
    fetched: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeSite {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds a detail page
    pub(crate) fn book(mut self, url: &str, id: &str, title: &str, ratings: u64, rating: f64) -> Self {
        self.pages
            .insert(url.to_string(), book_page(id, title, ratings, rating));
        self
    }

    /// Adds the similar-items page of `id`
    pub(crate) fn similar(mut self, id: &str, urls: &[&str]) -> Self {
        let body = std::iter::once("similar".to_string())
            .chain(urls.iter().map(|url| url.to_string()))
            .collect::<Vec<_>>()
            .join("\n");
        self.pages.insert(FakeExtractor.similar_url(id), body);
        self
    }

    /// Adds an arbitrary body
    pub(crate) fn page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    pub(crate) fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }

    pub(crate) fn fetch_count(&self, url: &str) -> usize {
        self.fetched().iter().filter(|u| *u == url).count()
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl Fetcher for FakeSite {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<String, FetchError>> {
        Box::pin(async move {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            self.fetched.lock().unwrap().push(url.to_string());

            tokio::time::sleep(Duration::from_millis(2)).await;

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| FetchError::Status {
                    url: url.to_string(),
                    status: 404,
                })
        })
    }
}

/// Reads `key=value` detail pages and newline-separated similar pages
pub(crate) struct FakeExtractor;

impl Extractor for FakeExtractor {
    fn extract_entry(&self, body: &str) -> Result<Entry, ExtractError> {
        if body.trim().is_empty() {
            return Err(ExtractError::EmptyDocument);
        }

        let mut entry = Entry::default();
        for line in body.lines() {
            match line.split_once('=') {
                Some(("id", id)) => entry.id = id.to_string(),
                Some(("title", title)) => entry.title = title.to_string(),
                Some(("ratings", ratings)) => entry.ratings = ratings.parse().unwrap_or(0),
                Some(("rating", rating)) => entry.rating = rating.parse().unwrap_or(0.0),
                _ => {}
            }
        }
        Ok(entry)
    }

    fn extract_links(&self, body: &str) -> Result<BTreeSet<String>, ExtractError> {
        if body.trim().is_empty() {
            return Err(ExtractError::EmptyDocument);
        }

        Ok(body
            .lines()
            .skip(1)
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect())
    }

    fn similar_url(&self, id: &str) -> String {
        format!("similar:{}", id)
    }
}

pub(crate) fn book_page(id: &str, title: &str, ratings: u64, rating: f64) -> String {
    format!(
        "id={}\ntitle={}\nratings={}\nrating={}",
        id, title, ratings, rating
    )
}
