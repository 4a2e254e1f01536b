//! Page extraction for catalog detail and similar-items pages
//!
//! Everything site-specific lives here: the markers that identify a title,
//! rating block or detail link, and the shape of the similar-items URL. The
//! rest of the crawler only sees [`Entry`] values and opaque URL strings.

use crate::config::SiteConfig;
use crate::entry::Entry;
use crate::ExtractError;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeSet;
use url::Url;

const TITLE_LABEL_PREFIX: &str = "Book title: ";

/// Turns raw page bodies into entries and neighbor URLs
pub trait Extractor: Send + Sync {
    /// Parses a detail page; the returned entry has no URL yet
    fn extract_entry(&self, body: &str) -> Result<Entry, ExtractError>;

    /// Parses a similar-items page into the set of candidate detail URLs
    fn extract_links(&self, body: &str) -> Result<BTreeSet<String>, ExtractError>;

    /// URL of the similar-items page for an entry identifier
    fn similar_url(&self, id: &str) -> String;
}

struct Selectors {
    title: Selector,
    quotes_link: Selector,
    genre_link: Selector,
    cover: Selector,
    contributors: Selector,
    contributor_name: Selector,
    rating: Selector,
    stats: Selector,
    link: Selector,
}

impl Selectors {
    fn new() -> Result<Self, ExtractError> {
        Ok(Self {
            title: parse_selector(r#"h1.Text__title1[data-testid="bookTitle"]"#)?,
            quotes_link: parse_selector(r#"a[href*="/work/quotes/"]"#)?,
            genre_link: parse_selector(r#"a[href*="/genres/"]"#)?,
            cover: parse_selector(
                r#"div.BookCover__image img.ResponsiveImage[role="presentation"][src]"#,
            )?,
            contributors: parse_selector("div.ContributorLinksList")?,
            contributor_name: parse_selector("a > span")?,
            rating: parse_selector("div.RatingStatistics__rating")?,
            stats: parse_selector("div.RatingStatistics__meta[aria-label]")?,
            link: parse_selector("a[href]")?,
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError::Selector(format!("{}: {}", selector, e)))
}

/// HTML extractor for the configured catalog site
pub struct HtmlExtractor {
    site: SiteConfig,
    base_url: Url,
    selectors: Selectors,
}

impl HtmlExtractor {
    /// Creates an extractor for the given site profile
    pub fn new(site: SiteConfig) -> Result<Self, ExtractError> {
        let base_url = Url::parse(&site.base_url)
            .map_err(|source| ExtractError::InvalidBaseUrl {
                url: site.base_url.clone(),
                source,
            })?;

        Ok(Self {
            site,
            base_url,
            selectors: Selectors::new()?,
        })
    }

    fn extract_title(&self, document: &Html) -> String {
        document
            .select(&self.selectors.title)
            .last()
            .map(|h1| match h1.value().attr("aria-label") {
                Some(label) => label
                    .strip_prefix(TITLE_LABEL_PREFIX)
                    .unwrap_or(label)
                    .to_string(),
                None => element_text(&h1),
            })
            .unwrap_or_default()
    }

    fn extract_id(&self, document: &Html) -> String {
        document
            .select(&self.selectors.quotes_link)
            .filter_map(|a| a.value().attr("href"))
            .last()
            .map(|href| last_segment(href).to_string())
            .unwrap_or_default()
    }

    fn extract_genres(&self, document: &Html) -> Vec<String> {
        let mut genres: Vec<String> = Vec::new();
        for href in document
            .select(&self.selectors.genre_link)
            .filter_map(|a| a.value().attr("href"))
        {
            let genre = last_segment(href);
            if !genre.is_empty() && !genres.iter().any(|g| g == genre) {
                genres.push(genre.to_string());
            }
        }
        genres
    }

    fn extract_authors(&self, document: &Html) -> Vec<String> {
        let mut authors = Vec::new();
        for list in document.select(&self.selectors.contributors) {
            let names: Vec<String> = list
                .select(&self.selectors.contributor_name)
                .map(|span| element_text(&span))
                .filter(|name| !name.is_empty())
                .collect();

            if !names.is_empty() {
                authors = names;
            }
        }
        authors
    }

    fn extract_cover(&self, document: &Html) -> Option<String> {
        document
            .select(&self.selectors.cover)
            .filter_map(|img| img.value().attr("src"))
            .last()
            .map(str::to_string)
    }

    fn extract_rating(&self, document: &Html, entry: &mut Entry) {
        let Some(div) = document.select(&self.selectors.rating).next() else {
            return;
        };

        let text = element_text(&div);
        match text.parse::<f64>() {
            Ok(rating) => entry.rating = rating,
            Err(e) => mark_unparsed(entry, "rating", &text, &e.to_string()),
        }
    }

    /// Reads counts from a label such as "1,234 ratings and 56 reviews"
    fn extract_stats(&self, document: &Html, entry: &mut Entry) {
        let Some(label) = document
            .select(&self.selectors.stats)
            .next()
            .and_then(|div| div.value().attr("aria-label"))
        else {
            return;
        };

        let parts: Vec<&str> = label.split_whitespace().collect();

        match parts.first().and_then(|ratings| parse_count(ratings)) {
            Some(ratings) => entry.ratings = ratings,
            None => mark_unparsed(entry, "ratings", label, "no leading count"),
        }

        match parts.get(3).and_then(|reviews| parse_count(reviews)) {
            Some(reviews) => entry.reviews = reviews,
            None => mark_unparsed(entry, "reviews", label, "no review count"),
        }
    }

    /// Resolves an href to an absolute detail-page URL on the configured site
    fn resolve_detail_link(&self, href: &str) -> Option<String> {
        let resolved = self.base_url.join(href.trim()).ok()?;

        if resolved.host_str() != self.base_url.host_str()
            || resolved.port_or_known_default() != self.base_url.port_or_known_default()
        {
            return None;
        }

        if !resolved.path().starts_with(&self.site.detail_path) {
            return None;
        }

        Some(resolved.to_string())
    }
}

impl Extractor for HtmlExtractor {
    fn extract_entry(&self, body: &str) -> Result<Entry, ExtractError> {
        if body.trim().is_empty() {
            return Err(ExtractError::EmptyDocument);
        }

        let document = Html::parse_document(body);

        let mut entry = Entry {
            title: self.extract_title(&document),
            id: self.extract_id(&document),
            cover_url: self.extract_cover(&document),
            authors: self.extract_authors(&document),
            genres: self.extract_genres(&document),
            ..Default::default()
        };
        self.extract_rating(&document, &mut entry);
        self.extract_stats(&document, &mut entry);

        Ok(entry)
    }

    fn extract_links(&self, body: &str) -> Result<BTreeSet<String>, ExtractError> {
        if body.trim().is_empty() {
            return Err(ExtractError::EmptyDocument);
        }

        let document = Html::parse_document(body);

        Ok(document
            .select(&self.selectors.link)
            .filter_map(|a| a.value().attr("href"))
            .filter_map(|href| self.resolve_detail_link(href))
            .collect())
    }

    fn similar_url(&self, id: &str) -> String {
        format!(
            "{}{}{}",
            self.site.base_url.trim_end_matches('/'),
            self.site.similar_path,
            id
        )
    }
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn last_segment(href: &str) -> &str {
    href.rsplit('/').next().unwrap_or_default()
}

fn parse_count(text: &str) -> Option<u64> {
    text.replace(',', "").parse().ok()
}

/// Zeroed fields are recorded so callers can tell "zero" from "unreadable"
fn mark_unparsed(entry: &mut Entry, field: &str, text: &str, reason: &str) {
    tracing::warn!("Could not parse {} from '{}': {}", field, text, reason);
    entry.unparsed.push(field.to_string());
}
