//! Output module for filtering, ranking and exporting crawl results
//!
//! This module handles:
//! - The acceptance filter that gates expansion and export
//! - Ranking the accepted entries of a store
//! - Writing the JSON export
//! - Recording crawl statistics

mod error;
mod export;
mod filter;
mod ranker;
pub mod stats;

pub use error::{OutputError, OutputResult};
pub use export::ExportWriter;
pub use filter::{is_ascii_title, AcceptanceFilter};
pub use ranker::rank;
pub use stats::{print_statistics, CrawlStatistics, LevelStatistics};
