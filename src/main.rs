//! Folio-Crawl main entry point
//!
//! This is the command-line interface for the Folio-Crawl catalog crawler.

use anyhow::Context;
use clap::Parser;
use folio_crawl::config::{resolve_config, ConfigOverrides};
use folio_crawl::crawler::crawl;
use folio_crawl::output::print_statistics;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Folio-Crawl: a breadth-first crawler for catalog "similar books" pages
///
/// Starting from a seed detail page, Folio-Crawl visits similar entries level
/// by level, keeps the ones that pass the acceptance filter and writes them,
/// ranked by number of ratings, to a JSON export that a later run can resume
/// from.
#[derive(Parser, Debug)]
#[command(name = "folio-crawl")]
#[command(version)]
#[command(about = "A breadth-first crawler for catalog similar-item pages", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Seed detail page URL
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Export file to write
    #[arg(short = 'o', long = "target", value_name = "FILE")]
    target: Option<String>,

    /// Previous export to resume from
    #[arg(short = 'i', long = "input", value_name = "FILE", conflicts_with = "fresh")]
    input: Option<String>,

    /// Number of levels to visit
    #[arg(long)]
    depth: Option<u32>,

    /// Maximum number of concurrent workers
    #[arg(long)]
    workers: Option<u32>,

    /// Minimum number of ratings for an entry to be accepted
    #[arg(long)]
    min_ratings: Option<u64>,

    /// Minimum average rating for an entry to be accepted
    #[arg(long)]
    min_rating: Option<f64>,

    /// Start from an empty store, ignoring any configured resume file
    #[arg(long)]
    fresh: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            seed_url: self.url.clone(),
            max_depth: self.depth,
            workers: self.workers,
            min_ratings: self.min_ratings,
            min_rating: self.min_rating,
            export_path: self.target.clone(),
            resume_path: self.input.clone(),
            fresh: self.fresh,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    if let Some(path) = &cli.config {
        tracing::info!("Loading configuration from: {}", path.display());
    }
    let (config, hash) = resolve_config(cli.config.as_deref(), &cli.overrides())
        .context("Failed to load configuration")?;
    if let Some(hash) = hash {
        tracing::info!("Configuration loaded successfully (hash: {})", hash);
    }

    let export_path = config.output.export_path.clone();
    let outcome = crawl(config)
        .await
        .with_context(|| format!("Crawl failed (export: {})", export_path))?;

    if !cli.quiet {
        print_statistics(&outcome.statistics, outcome.exported);
    }

    Ok(())
}

/// Sets up the tracing subscriber for logging
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("folio_crawl=info,warn"),
            1 => EnvFilter::new("folio_crawl=debug,info"),
            2 => EnvFilter::new("folio_crawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
