//! Bounded worker pool for fetch+extract tasks
//!
//! Workers pull tasks from a shared queue and report each outcome on a
//! channel. The pool never touches the store: all mutation happens in the
//! single consumer of the outcomes.

use crate::crawler::extractor::Extractor;
use crate::crawler::fetcher::Fetcher;
use crate::entry::Entry;
use crate::output::AcceptanceFilter;
use crate::TaskError;
use std::collections::{BTreeSet, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio::task::JoinSet;

/// One unit of work for a worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Fetch and extract a detail page; look up its neighbors if `expand` is
    /// set and the entry qualifies
    Visit { url: String, expand: bool },

    /// Look up the neighbors of an entry that is already stored
    Expand { url: String, id: String },
}

impl Task {
    pub fn url(&self) -> &str {
        match self {
            Task::Visit { url, .. } | Task::Expand { url, .. } => url,
        }
    }
}

/// What a worker produced for one task
#[derive(Debug)]
pub enum TaskOutcome {
    /// The detail page was extracted, and its similar-items page too when
    /// the entry was expanded
    Visited {
        entry: Entry,
        neighbors: BTreeSet<String>,
    },

    /// Neighbors of an already-stored entry were found
    Expanded {
        url: String,
        neighbors: BTreeSet<String>,
    },

    /// The task produced nothing
    ///
    /// A failed similar-items lookup during a visit also lands here: the
    /// entry is dropped so that a later run visits it again.
    Failed { url: String, error: TaskError },
}

/// Bounded pool of concurrent fetch+extract workers
#[derive(Clone)]
pub struct WorkerPool {
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn Extractor>,
    filter: AcceptanceFilter,
    num_workers: usize,
}

impl WorkerPool {
    /// Creates a pool of at most `num_workers` concurrent workers
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        extractor: Arc<dyn Extractor>,
        filter: AcceptanceFilter,
        num_workers: usize,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            filter,
            num_workers: num_workers.max(1),
        }
    }

    /// Runs every task to completion and returns their outcomes
    ///
    /// Spawns `min(num_workers, tasks.len())` workers. Returns only once all
    /// of them have finished, so the caller sees the complete set of
    /// outcomes. Outcome order follows completion order.
    pub async fn run(&self, tasks: Vec<Task>) -> Vec<TaskOutcome> {
        if tasks.is_empty() {
            return Vec::new();
        }

        let worker_count = self.num_workers.min(tasks.len());
        let queue = Arc::new(Mutex::new(VecDeque::from(tasks)));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut workers = JoinSet::new();

        for worker_id in 0..worker_count {
            let queue = Arc::clone(&queue);
            let tx = tx.clone();
            let pool = self.clone();
            workers.spawn(async move { pool.work(worker_id, queue, tx).await });
        }
        // The channel closes once the last worker drops its sender
        drop(tx);

        let mut outcomes = Vec::new();
        while let Some(outcome) = rx.recv().await {
            outcomes.push(outcome);
        }

        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                tracing::error!("Worker task ended abnormally: {}", e);
            }
        }

        outcomes
    }

    async fn work(
        &self,
        worker_id: usize,
        queue: Arc<Mutex<VecDeque<Task>>>,
        tx: mpsc::UnboundedSender<TaskOutcome>,
    ) {
        loop {
            let next = match queue.lock() {
                Ok(mut queue) => queue.pop_front(),
                Err(poisoned) => poisoned.into_inner().pop_front(),
            };
            let Some(task) = next else {
                break;
            };

            let outcome = self.process(task).await;
            if let TaskOutcome::Visited { entry, .. } = &outcome {
                tracing::debug!("Worker {}: {}", worker_id, entry.title);
            }

            if tx.send(outcome).is_err() {
                break;
            }
        }
    }

    async fn process(&self, task: Task) -> TaskOutcome {
        match task {
            Task::Visit { url, expand } => self.visit(url, expand).await,
            Task::Expand { url, id } => match self.neighbors(&id).await {
                Ok(neighbors) => TaskOutcome::Expanded { url, neighbors },
                Err(error) => TaskOutcome::Failed { url, error },
            },
        }
    }

    async fn visit(&self, url: String, expand: bool) -> TaskOutcome {
        let body = match self.fetcher.fetch(&url).await {
            Ok(body) => body,
            Err(e) => {
                return TaskOutcome::Failed {
                    url,
                    error: e.into(),
                }
            }
        };

        let entry = match self.extractor.extract_entry(&body) {
            Ok(entry) => entry.with_url(url),
            Err(source) => {
                return TaskOutcome::Failed {
                    error: TaskError::Extract {
                        url: url.clone(),
                        source,
                    },
                    url,
                }
            }
        };

        if !expand || !entry.is_expandable() || !self.filter.accepts(&entry) {
            return TaskOutcome::Visited {
                entry,
                neighbors: BTreeSet::new(),
            };
        }

        match self.neighbors(&entry.id).await {
            Ok(neighbors) => TaskOutcome::Visited { entry, neighbors },
            Err(error) => TaskOutcome::Failed {
                url: entry.url,
                error,
            },
        }
    }

    /// Fetches and parses the similar-items page for `id`
    async fn neighbors(&self, id: &str) -> Result<BTreeSet<String>, TaskError> {
        let similar_url = self.extractor.similar_url(id);
        let body = self.fetcher.fetch(&similar_url).await?;

        self.extractor
            .extract_links(&body)
            .map_err(|source| TaskError::Extract {
                url: similar_url,
                source,
            })
    }
}
