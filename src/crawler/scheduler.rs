//! Level scheduler for the breadth-first traversal
//!
//! This module handles:
//! - The frontier of URLs to visit at one depth
//! - Running one whole level through the worker pool
//! - Merging the level's entries into the store once every task is done
//! - Collecting the neighbor URLs that feed the next level

use crate::crawler::worker::{Task, TaskOutcome, WorkerPool};
use crate::output::{AcceptanceFilter, LevelStatistics};
use crate::storage::Storage;
use crate::TaskError;
use std::collections::{BTreeSet, HashSet};

/// URLs to visit at one depth
///
/// Duplicates are dropped on construction; order is kept but carries no
/// meaning for correctness.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontier {
    urls: Vec<String>,
}

impl Frontier {
    pub fn new<I>(urls: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut seen = HashSet::new();
        let urls = urls
            .into_iter()
            .filter(|url| seen.insert(url.clone()))
            .collect();
        Self { urls }
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }
}

/// Result of one level
#[derive(Debug, Default)]
pub struct LevelReport {
    /// Neighbor URLs found on this level that are not in the store
    pub discovered: BTreeSet<String>,

    /// Errors recorded by this level's tasks
    pub errors: Vec<TaskError>,

    pub stats: LevelStatistics,
}

/// Drives one frontier at a time through the worker pool
pub struct LevelScheduler {
    pool: WorkerPool,
    filter: AcceptanceFilter,
}

impl LevelScheduler {
    pub fn new(pool: WorkerPool, filter: AcceptanceFilter) -> Self {
        Self { pool, filter }
    }

    /// Processes `frontier` to completion
    ///
    /// Every URL is fetched and extracted by the pool. Once all tasks have
    /// finished, successful entries are merged into `storage`, and the union
    /// of discovered neighbors minus the store's URLs is returned. On the
    /// final level no neighbors are looked up.
    pub async fn run_level(
        &self,
        depth: u32,
        frontier: &Frontier,
        is_final: bool,
        storage: &mut dyn Storage,
    ) -> LevelReport {
        let tasks = frontier
            .urls()
            .iter()
            .map(|url| Task::Visit {
                url: url.clone(),
                expand: !is_final,
            })
            .collect();

        let outcomes = self.pool.run(tasks).await;
        self.collect(depth, frontier.len(), outcomes, storage)
    }

    /// Looks up the neighbors of entries that are already stored
    ///
    /// Used once at the start of a resumed run. `targets` holds
    /// `(url, id)` pairs; nothing is merged, only neighbors are collected.
    pub async fn expand_stored(
        &self,
        targets: Vec<(String, String)>,
        storage: &mut dyn Storage,
    ) -> LevelReport {
        let scheduled = targets.len();
        let tasks = targets
            .into_iter()
            .map(|(url, id)| Task::Expand { url, id })
            .collect();

        let outcomes = self.pool.run(tasks).await;
        self.collect(0, scheduled, outcomes, storage)
    }

    fn collect(
        &self,
        depth: u32,
        scheduled: usize,
        outcomes: Vec<TaskOutcome>,
        storage: &mut dyn Storage,
    ) -> LevelReport {
        let mut report = LevelReport {
            stats: LevelStatistics {
                depth,
                scheduled,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut candidates = BTreeSet::new();

        for outcome in outcomes {
            match outcome {
                TaskOutcome::Visited { entry, neighbors } => {
                    if !self.filter.accepts(&entry) {
                        report.stats.rejected += 1;
                    }
                    let url = entry.url.clone();
                    storage.merge(&url, entry);
                    report.stats.stored += 1;
                    candidates.extend(neighbors);
                }
                TaskOutcome::Expanded { url, neighbors } => {
                    tracing::debug!("Re-expanded {}: {} neighbors", url, neighbors.len());
                    candidates.extend(neighbors);
                }
                TaskOutcome::Failed { url, error } => {
                    tracing::warn!("Dropping {}: {}", url, error);
                    report.stats.failed += 1;
                    report.errors.push(error);
                }
            }
        }

        report.discovered = candidates
            .into_iter()
            .filter(|url| !storage.contains(url))
            .collect();
        report.stats.discovered = report.discovered.len();
        report
    }
}
