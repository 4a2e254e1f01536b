//! Page fetcher
//!
//! This module handles all HTTP requests for the crawler, including:
//! - The [`Fetcher`] seam the worker pool fetches through
//! - Building HTTP clients with proper user agent strings
//! - GET requests that classify non-2xx responses as errors
//!
//! There is no retry: a failed fetch drops its URL from the run.

use crate::config::UserAgentConfig;
use crate::FetchError;
use futures::future::BoxFuture;
use reqwest::Client;
use std::time::Duration;

/// Source of raw page bodies
///
/// Implementations must be shareable across worker tasks. Any timeout is the
/// implementation's own concern; the crawler waits for every fetch it starts.
pub trait Fetcher: Send + Sync {
    /// Fetches `url` and returns its body
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<String, FetchError>>;
}

/// Fetcher backed by a reqwest [`Client`]
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher using the given client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a fetcher with a client built from the user agent configuration
    pub fn from_config(config: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?))
    }
}

impl Fetcher for HttpFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<String, FetchError>> {
        Box::pin(fetch_url(&self.client, url))
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Example
///
/// ```no_run
/// use folio_crawl::config::UserAgentConfig;
/// use folio_crawl::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version
    let user_agent = format!("{}/{}", config.crawler_name, config.crawler_version);

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and returns the response body
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx | `Ok(body)` |
/// | Any other status | `FetchError::Status` |
/// | Connect/timeout/transport failure | `FetchError::Http` |
/// | Body could not be read | `FetchError::Body` |
pub async fn fetch_url(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client.get(url).send().await.map_err(|source| FetchError::Http {
        url: url.to_string(),
        source,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|source| FetchError::Body {
        url: url.to_string(),
        source,
    })
}
