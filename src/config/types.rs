use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Knowledge-Index
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub site: SiteConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub sections: Vec<SeedSection>,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum depth to crawl from seed sections (seeds are depth 0)
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Delay after every fetch attempt (milliseconds)
    #[serde(rename = "pacing-delay-ms")]
    pub pacing_delay_ms: u64,

    /// Per-fetch timeout (seconds)
    #[serde(rename = "fetch-timeout-secs")]
    pub fetch_timeout_secs: u64,

    /// Interval between scheduled full passes (hours)
    #[serde(rename = "recrawl-interval-hours")]
    pub recrawl_interval_hours: u64,

    /// Whether the scheduler runs a pass as soon as it starts
    #[serde(rename = "crawl-on-start")]
    pub crawl_on_start: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 1,
            pacing_delay_ms: 2000,
            fetch_timeout_secs: 10,
            recrawl_interval_hours: 24,
            crawl_on_start: true,
        }
    }
}

impl CrawlerConfig {
    pub fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.pacing_delay_ms)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn recrawl_interval(&self) -> Duration {
        Duration::from_secs(self.recrawl_interval_hours.saturating_mul(60 * 60))
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl UserAgentConfig {
    /// Formats the header value: `CrawlerName/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{})",
            self.crawler_name, self.crawler_version, self.contact_url
        )
    }
}

/// The documentation site being indexed
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Only absolute links starting with this prefix are followed
    #[serde(rename = "domain-prefix")]
    pub domain_prefix: String,
}

/// Search result limits
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Matches injected as completion context
    #[serde(rename = "context-limit")]
    pub context_limit: usize,

    /// Matches returned by a direct search
    #[serde(rename = "result-limit")]
    pub result_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            context_limit: 3,
            result_limit: 5,
        }
    }
}

/// A configured crawl root
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedSection {
    /// Display name, used as the title fallback for the seed page
    pub name: String,

    /// Absolute URL of the section's landing page
    pub url: String,
}

impl SeedSection {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}
