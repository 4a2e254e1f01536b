//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the depth loop that coordinates a crawl:
//! - Loading the store from a previous export when resuming
//! - Seeding the first frontier (and re-expanding resumed entries once)
//! - Running one level at a time until the depth limit or an empty frontier
//! - Keeping every URL scheduled at most once per run
//! - Ranking the accepted entries at the end

use crate::config::Config;
use crate::crawler::extractor::{Extractor, HtmlExtractor};
use crate::crawler::fetcher::{Fetcher, HttpFetcher};
use crate::crawler::scheduler::{Frontier, LevelReport, LevelScheduler};
use crate::crawler::worker::WorkerPool;
use crate::entry::Entry;
use crate::output::{rank, AcceptanceFilter, CrawlStatistics, ExportWriter};
use crate::storage::{open_export_or_empty, MemoryStorage, Storage};
use crate::FolioError;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use std::sync::Arc;

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    storage: MemoryStorage,
    scheduler: LevelScheduler,
    filter: AcceptanceFilter,
    scheduled: HashSet<String>,
    stats: CrawlStatistics,
}

impl Coordinator {
    /// Creates a coordinator over explicit collaborators
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `fetcher` - Source of page bodies
    /// * `extractor` - Parser for detail and similar-items pages
    /// * `storage` - Initial store; non-empty when resuming
    pub fn new(
        config: Config,
        fetcher: Arc<dyn Fetcher>,
        extractor: Arc<dyn Extractor>,
        storage: MemoryStorage,
    ) -> Self {
        let filter = AcceptanceFilter::new(&config.filter);
        let pool = WorkerPool::new(
            fetcher,
            extractor,
            filter,
            config.crawler.workers as usize,
        );

        let mut stats = CrawlStatistics::new();
        stats.resumed_entries = storage.len();

        Self {
            config: Arc::new(config),
            storage,
            scheduler: LevelScheduler::new(pool, filter),
            filter,
            scheduled: HashSet::new(),
            stats,
        }
    }

    /// Creates a coordinator that crawls over HTTP
    ///
    /// Loads the configured resume file, if any. A resume file that cannot
    /// be read or parsed is replaced by an empty store.
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(FolioError)` - The HTTP client or extractor could not be built
    pub fn from_config(config: Config) -> Result<Self, FolioError> {
        let fetcher = HttpFetcher::from_config(&config.user_agent)?;
        let extractor = HtmlExtractor::new(config.site.clone())?;

        let storage = match config.output.resume_path() {
            Some(path) => open_export_or_empty(Path::new(path)),
            None => MemoryStorage::new(),
        };

        Ok(Self::new(
            config,
            Arc::new(fetcher),
            Arc::new(extractor),
            storage,
        ))
    }

    /// Runs the crawl to completion
    ///
    /// Level `d` runs for `d` in `1..=max-depth`. The last level fetches and
    /// stores its entries but never looks up their neighbors. The loop stops
    /// early once a level discovers nothing new.
    pub async fn run(&mut self) {
        let max_depth = self.config.crawler.max_depth;
        tracing::info!(
            "Starting crawl from {} (max depth {}, {} workers, {} stored entries)",
            self.config.crawler.seed_url,
            max_depth,
            self.config.crawler.workers,
            self.storage.len()
        );

        if max_depth == 0 {
            tracing::info!("Max depth is 0, nothing to fetch");
            self.stats.finish();
            return;
        }

        let mut frontier = self.initial_frontier().await;

        for depth in 1..=max_depth {
            if frontier.is_empty() {
                tracing::info!("Frontier is empty at depth {}, crawl complete", depth);
                break;
            }

            let is_final = depth == max_depth;
            tracing::info!("depth: {}", depth);
            tracing::info!("books: {}", frontier.len());

            self.scheduled.extend(frontier.urls().iter().cloned());
            let report = self
                .scheduler
                .run_level(depth, &frontier, is_final, &mut self.storage)
                .await;

            frontier = self.next_frontier(&report.discovered);
            self.record(report, frontier.len());
        }

        self.stats.finish();
        tracing::info!(
            "Crawl completed: {} entries stored in {}s",
            self.storage.len(),
            self.stats.duration_seconds().unwrap_or_default()
        );
    }

    /// Builds the level-1 frontier
    ///
    /// The seed is included unless it is already stored. When the store was
    /// loaded from a previous export, each accepted entry with an identifier
    /// has its neighbors looked up once, and those not yet stored join the
    /// frontier.
    async fn initial_frontier(&mut self) -> Frontier {
        let seed = self.config.crawler.seed_url.clone();
        let mut candidates = Vec::new();

        if self.storage.contains(&seed) {
            tracing::info!("Seed {} already visited", seed);
        } else {
            candidates.push(seed);
        }

        if self.config.crawler.reexpand_on_resume && !self.storage.is_empty() {
            let mut targets: Vec<(String, String)> = self
                .storage
                .all_entries()
                .into_iter()
                .filter(|entry| entry.is_expandable() && self.filter.accepts(entry))
                .map(|entry| (entry.url, entry.id))
                .collect();
            targets.sort();

            tracing::info!("Re-expanding {} resumed entries", targets.len());
            let report = self
                .scheduler
                .expand_stored(targets, &mut self.storage)
                .await;

            candidates.extend(report.discovered.iter().cloned());
            let discovered = report.discovered.len();
            self.record(report, discovered);
        }

        Frontier::new(candidates)
    }

    /// Drops URLs already stored or already scheduled earlier in this run
    fn next_frontier(&self, discovered: &BTreeSet<String>) -> Frontier {
        Frontier::new(
            discovered
                .iter()
                .filter(|url| !self.scheduled.contains(*url) && !self.storage.contains(url))
                .cloned(),
        )
    }

    fn record(&mut self, report: LevelReport, next_frontier: usize) {
        let mut level = report.stats;
        level.discovered = next_frontier;

        self.stats
            .errors
            .extend(report.errors.iter().map(|error| error.to_string()));
        self.stats.levels.push(level);
    }

    /// Accepted entries ordered by number of ratings, highest first
    pub fn ranked(&self) -> Vec<Entry> {
        rank(&self.storage, &self.filter)
    }

    pub fn storage(&self) -> &MemoryStorage {
        &self.storage
    }

    pub fn statistics(&self) -> &CrawlStatistics {
        &self.stats
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Summary of a finished run
#[derive(Debug)]
pub struct CrawlOutcome {
    /// Number of entries written to the export
    pub exported: usize,
    pub statistics: CrawlStatistics,
}

/// Runs a complete crawl over HTTP and writes the export
///
/// The resume file is read before the export file is created, so both may
/// name the same path.
pub async fn run_crawl(config: Config) -> Result<CrawlOutcome, FolioError> {
    let mut coordinator = Coordinator::from_config(config)?;
    let writer = ExportWriter::create(Path::new(&coordinator.config().output.export_path))?;

    coordinator.run().await;

    let exported = writer.write(coordinator.ranked())?;
    Ok(CrawlOutcome {
        exported,
        statistics: coordinator.stats,
    })
}
