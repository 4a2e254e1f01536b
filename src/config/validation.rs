use crate::config::types::{Config, CrawlerConfig, FilterConfig, OutputConfig, SiteConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_filter_config(&config.filter)?;
    validate_site_config(&config.site)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // max_depth >= 0 is always true for u32; 0 means "fetch nothing"

    if config.workers < 1 || config.workers > 100 {
        return Err(ConfigError::Validation(format!(
            "workers must be between 1 and 100, got {}",
            config.workers
        )));
    }

    validate_http_url(&config.seed_url, "seed-url")?;

    Ok(())
}

/// Validates acceptance filter thresholds
fn validate_filter_config(config: &FilterConfig) -> Result<(), ConfigError> {
    if !(0.0..=5.0).contains(&config.min_rating) {
        return Err(ConfigError::Validation(format!(
            "min-rating must be between 0.0 and 5.0, got {}",
            config.min_rating
        )));
    }

    Ok(())
}

/// Validates the site profile
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    validate_http_url(&config.base_url, "base-url")?;

    for (name, path) in [
        ("similar-path", &config.similar_path),
        ("detail-path", &config.detail_path),
    ] {
        if !path.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "{} must start with '/', got '{}'",
                name, path
            )));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.export_path.is_empty() {
        return Err(ConfigError::Validation(
            "export-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Checks that `value` parses as an http(s) URL
fn validate_http_url(value: &str, name: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", name, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "{} '{}' must use http or https",
            name, value
        )));
    }

    Ok(())
}
