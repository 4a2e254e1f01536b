//! Folio-Crawl: a level-synchronized crawler for catalog "similar item" graphs
//!
//! This crate walks a graph of catalog detail pages breadth-first, starting
//! from a seed entry and following each accepted entry's "similar items" page,
//! then exports the accepted entries ranked by their number of ratings.

pub mod config;
pub mod crawler;
pub mod entry;
pub mod output;
pub mod storage;

use thiserror::Error;

/// Main error type for Folio-Crawl operations
#[derive(Debug, Error)]
pub enum FolioError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors reported by a page fetcher
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Unexpected status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to read body of {url}: {source}")]
    Body { url: String, source: reqwest::Error },
}

/// Errors reported by a page extractor
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Page body is empty")]
    EmptyDocument,

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("Invalid site base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
}

/// Failure of one worker task; recorded in the level report, never fatal
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("error extracting {url}: {source}")]
    Extract { url: String, source: ExtractError },
}

impl TaskError {
    /// The URL whose fetch or extraction failed
    pub fn url(&self) -> &str {
        match self {
            TaskError::Fetch(FetchError::Http { url, .. })
            | TaskError::Fetch(FetchError::Status { url, .. })
            | TaskError::Fetch(FetchError::Body { url, .. })
            | TaskError::Extract { url, .. } => url,
        }
    }
}

/// Result type alias for Folio-Crawl operations
pub type Result<T> = std::result::Result<T, FolioError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, Extractor, Fetcher};
pub use entry::{Books, Entry};
pub use output::{rank, AcceptanceFilter};
pub use storage::{MemoryStorage, Storage};
