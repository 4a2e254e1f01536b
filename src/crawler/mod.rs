//! Crawler module for the level-synchronized traversal
//!
//! This module contains the core crawling logic, including:
//! - The fetcher and extractor collaborators (HTTP and HTML implementations)
//! - The bounded worker pool that processes one level's tasks
//! - The level scheduler and its end-of-level barrier
//! - Overall crawl coordination, resume and export

mod coordinator;
mod extractor;
mod fetcher;
mod scheduler;
mod worker;

#[cfg(test)]
pub(crate) mod testing;

pub use coordinator::{run_crawl, Coordinator, CrawlOutcome};
pub use extractor::{Extractor, HtmlExtractor};
pub use fetcher::{build_http_client, fetch_url, Fetcher, HttpFetcher};
pub use scheduler::{Frontier, LevelReport, LevelScheduler};
pub use worker::{Task, TaskOutcome, WorkerPool};

use crate::config::Config;
use crate::FolioError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Load the resume file, if one is configured
/// 2. Create the export file
/// 3. Build the HTTP client and HTML extractor
/// 4. Visit the seed and its similar entries level by level
/// 5. Write the ranked, accepted entries to the export
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - Crawl completed; per-page failures are in the statistics
/// * `Err(FolioError)` - The export could not be created or written
pub async fn crawl(config: Config) -> Result<CrawlOutcome, FolioError> {
    run_crawl(config).await
}
