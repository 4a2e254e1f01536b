use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Values supplied on the command line that take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub seed_url: Option<String>,
    pub max_depth: Option<u32>,
    pub workers: Option<u32>,
    pub min_ratings: Option<u64>,
    pub min_rating: Option<f64>,
    pub export_path: Option<String>,
    pub resume_path: Option<String>,
    /// Ignore any configured resume file
    pub fresh: bool,
}

impl ConfigOverrides {
    /// Applies the overrides on top of `config`
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(seed_url) = &self.seed_url {
            config.crawler.seed_url = seed_url.clone();
        }
        if let Some(max_depth) = self.max_depth {
            config.crawler.max_depth = max_depth;
        }
        if let Some(workers) = self.workers {
            config.crawler.workers = workers;
        }
        if let Some(min_ratings) = self.min_ratings {
            config.filter.min_ratings = min_ratings;
        }
        if let Some(min_rating) = self.min_rating {
            config.filter.min_rating = min_rating;
        }
        if let Some(export_path) = &self.export_path {
            config.output.export_path = export_path.clone();
        }
        if let Some(resume_path) = &self.resume_path {
            config.output.resume_path = resume_path.clone();
        }
        if self.fresh {
            config.output.resume_path.clear();
        }
        config
    }
}

/// Parses configuration TOML without validating it
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use folio_crawl::config::load_config;
///
/// let config = load_config(Path::new("folio.toml")).unwrap();
/// println!("Max depth: {}", config.crawler.max_depth);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// This is logged at startup so an export can be traced back to the
/// configuration that produced it.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash of the file content
/// * `Err(ConfigError)` - Failed to read the file
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Builds the effective configuration for a run
///
/// Starts from the file at `path` (or the defaults when there is none),
/// applies the command-line overrides, then validates the result.
///
/// # Returns
///
/// * `Ok((Config, Option<String>))` - The configuration and, when loaded from
///   a file, that file's hash
/// * `Err(ConfigError)` - The file could not be read or parsed, or the merged
///   configuration is invalid
pub fn resolve_config(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<(Config, Option<String>), ConfigError> {
    let (base, hash) = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            (parse_config(&content)?, Some(compute_config_hash(path)?))
        }
        None => (Config::default(), None),
    };

    let config = overrides.apply(base);
    validate(&config)?;
    Ok((config, hash))
}
