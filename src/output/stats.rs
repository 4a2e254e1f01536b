//! Crawl statistics
//!
//! Counters collected level by level while a crawl runs, and their printout.

use chrono::{DateTime, Utc};

/// Counters for one traversal level
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelStatistics {
    /// Level number; 0 is the resume re-expansion pass
    pub depth: u32,

    /// Tasks scheduled on this level
    pub scheduled: usize,

    /// Entries merged into the store
    pub stored: usize,

    /// Stored entries that failed the acceptance filter
    pub rejected: usize,

    /// Tasks that produced no entry
    pub failed: usize,

    /// New URLs handed to the next level
    pub discovered: usize,
}

/// Summary of a whole crawl run
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Entries loaded from a resume file
    pub resumed_entries: usize,

    pub levels: Vec<LevelStatistics>,

    /// One line per recorded task error
    pub errors: Vec<String>,
}

impl CrawlStatistics {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            resumed_entries: 0,
            levels: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }

    pub fn total_stored(&self) -> usize {
        self.levels.iter().map(|l| l.stored).sum()
    }

    pub fn total_failed(&self) -> usize {
        self.levels.iter().map(|l| l.failed).sum()
    }
}

impl Default for CrawlStatistics {
    fn default() -> Self {
        Self::new()
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics, exported: usize) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Started: {}", stats.started_at.to_rfc3339());
    if let Some(seconds) = stats.duration_seconds() {
        println!("  Duration: {}s", seconds);
    }
    if stats.resumed_entries > 0 {
        println!("  Resumed entries: {}", stats.resumed_entries);
    }
    println!("  Entries fetched: {}", stats.total_stored());
    println!("  Failed tasks: {}", stats.total_failed());
    println!("  Entries exported: {}", exported);
    println!();

    if !stats.levels.is_empty() {
        println!("Levels:");
        for level in &stats.levels {
            println!(
                "  depth {}: {} scheduled, {} stored ({} rejected), {} failed, {} discovered",
                level.depth,
                level.scheduled,
                level.stored,
                level.rejected,
                level.failed,
                level.discovered
            );
        }
        println!();
    }

    if !stats.errors.is_empty() {
        println!("Errors ({}):", stats.errors.len());
        for error in &stats.errors {
            println!("  - {}", error);
        }
        println!();
    }
}
