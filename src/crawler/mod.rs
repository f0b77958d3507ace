//! Crawler module for page fetching and indexing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with a bounded timeout
//! - HTML parsing into title, text, and in-domain links
//! - Depth-bounded pass orchestration with deduplication and pacing
//! - Periodic re-crawl scheduling with a manual trigger

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::{CrawlSettings, Crawler, PassReport};
pub use fetcher::{build_http_client, FetchedPage, HttpFetcher, PageFetcher};
pub use parser::{
    collapse_whitespace, extract_page, parse_html, truncate_chars, DiscoveredLink, ParsedPage,
    MAX_CONTENT_CHARS,
};
pub use scheduler::{CrawlScheduler, ScheduleSettings};

use crate::config::Config;
use crate::store::DocumentStore;
use crate::IndexError;
use std::sync::Arc;

/// Builds a network-backed crawler writing into `store`
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `store` - The document store the crawler populates
///
/// # Returns
///
/// * `Ok(Crawler)` - Crawler with an HTTP fetcher built from the config
/// * `Err(IndexError)` - The HTTP client could not be built
pub fn build_crawler(
    config: &Config,
    store: Arc<DocumentStore>,
) -> Result<Crawler<HttpFetcher>, IndexError> {
    let fetcher = HttpFetcher::new(&config.user_agent, config.crawler.fetch_timeout())?;
    Ok(Crawler::new(fetcher, store, CrawlSettings::from_config(config)))
}

/// Runs a single pass over the configured sections
///
/// This is the entry point for one-shot indexing. It will:
/// 1. Build the HTTP client
/// 2. Walk every seed section to the configured depth
/// 3. Write each extracted page into `store`
///
/// # Example
///
/// ```no_run
/// use knowledge_index::config::load_config;
/// use knowledge_index::crawler::crawl_once;
/// use knowledge_index::store::DocumentStore;
/// use std::path::Path;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("knowledge-index.toml"))?;
/// let store = Arc::new(DocumentStore::new());
/// let report = crawl_once(&config, Arc::clone(&store)).await?;
/// println!("{} documents indexed", report.total_documents);
/// # Ok(())
/// # }
/// ```
pub async fn crawl_once(
    config: &Config,
    store: Arc<DocumentStore>,
) -> Result<PassReport, IndexError> {
    build_crawler(config, store)?.crawl(&config.sections).await
}
