//! Knowledge-Index: an in-memory documentation index
//!
//! This crate crawls a fixed set of documentation sections, keeps the
//! extracted pages in an in-memory store, re-crawls them on a schedule, and
//! answers substring lookups used as context for a downstream completion call.

pub mod config;
pub mod crawler;
pub mod output;
pub mod search;
pub mod state;
pub mod store;
pub mod url;

use thiserror::Error;

/// Main error type for Knowledge-Index operations
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("A crawl pass is already in progress")]
    PassInProgress,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while retrieving a single page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("Failed to read body of {url}: {message}")]
    Body { url: String, message: String },
}

/// Errors raised while turning a fetched body into a page
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Content at {url} is not markup (content-type: {content_type})")]
    NotMarkup { url: String, content_type: String },
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Knowledge-Index operations
pub type Result<T> = std::result::Result<T, IndexError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlScheduler, Crawler, HttpFetcher, PageFetcher, PassReport};
pub use search::{SearchHit, SearchIndex};
pub use state::{CrawlStatus, StatusSnapshot};
pub use store::{Document, DocumentStore};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts_into_index_error() {
        let error: IndexError = ConfigError::Validation("no sections".to_string()).into();
        assert!(matches!(error, IndexError::Config(ConfigError::Validation(_))));
        assert_eq!(
            error.to_string(),
            "Configuration error: Validation error: no sections"
        );
    }

    #[test]
    fn test_store_error_converts_into_index_error() {
        let error: IndexError = store::StoreError::Poisoned.into();
        assert_eq!(error.to_string(), "Store error: Document store lock poisoned");
    }
}
