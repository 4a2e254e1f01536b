//! Configuration module for Folio-Crawl
//!
//! This module handles loading, parsing, and validating TOML configuration files,
//! and merging them with command-line overrides.
//!
//! # Example
//!
//! ```no_run
//! use folio_crawl::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("folio.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, FilterConfig, OutputConfig, SiteConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{
    compute_config_hash, load_config, parse_config, resolve_config, ConfigOverrides,
};
pub use validation::validate;
