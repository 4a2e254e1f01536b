use serde::Deserialize;

/// Main configuration structure for Folio-Crawl
///
/// Every section and key is optional in the TOML file; missing values take
/// the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub filter: FilterConfig,
    pub site: SiteConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// URL of the entry the crawl starts from
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Number of levels to fetch; the last level is never expanded
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Maximum number of concurrent fetch+extract workers
    pub workers: u32,

    /// Re-expand accepted entries loaded from a resume file once
    #[serde(rename = "reexpand-on-resume")]
    pub reexpand_on_resume: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            seed_url: "https://www.goodreads.com/book/show/4099.The_Pragmatic_Programmer"
                .to_string(),
            max_depth: 2,
            workers: 20,
            reexpand_on_resume: true,
        }
    }
}

/// Acceptance filter thresholds
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Minimum number of ratings
    #[serde(rename = "min-ratings")]
    pub min_ratings: u64,

    /// Minimum average rating
    #[serde(rename = "min-rating")]
    pub min_rating: f64,

    /// Reject titles containing non-ASCII characters
    #[serde(rename = "ascii-title")]
    pub ascii_title: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_ratings: 500,
            min_rating: 3.5,
            ascii_title: true,
        }
    }
}

/// Site profile used by the page extractor
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL that relative links are resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path prefix of the similar-items page; the identifier is appended
    #[serde(rename = "similar-path")]
    pub similar_path: String,

    /// Path prefix identifying links to detail pages
    #[serde(rename = "detail-path")]
    pub detail_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.goodreads.com".to_string(),
            similar_path: "/book/similar/".to_string(),
            detail_path: "/book/show/".to_string(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// Per-request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "folio-crawl".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            timeout_secs: 30,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the ranked JSON export
    #[serde(rename = "export-path")]
    pub export_path: String,

    /// Prior export to resume from; empty for a fresh run
    #[serde(rename = "resume-path")]
    pub resume_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            export_path: "output.json".to_string(),
            resume_path: String::new(),
        }
    }
}

impl OutputConfig {
    /// The resume file, if one is configured
    pub fn resume_path(&self) -> Option<&str> {
        if self.resume_path.is_empty() {
            None
        } else {
            Some(&self.resume_path)
        }
    }
}
