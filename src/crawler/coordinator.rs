//! Crawler coordinator - full pass orchestration
//!
//! This module contains the crawl loop that:
//! - Walks each seed section depth-first with an explicit worklist
//! - Deduplicates by URL within a pass and against pre-existing documents
//! - Coordinates fetching, extraction, and store writes
//! - Paces outbound requests with a fixed delay
//! - Serializes passes so only one runs at a time

use crate::config::{Config, SeedSection};
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::parser::extract_page;
use crate::state::{CrawlStatus, PageOutcome, StatusSnapshot};
use crate::store::{Document, DocumentStore, Upsert};
use crate::url::canonicalize_url;
use crate::IndexError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use url::Url;

/// Traversal limits for a pass
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    /// Deepest level fetched; seeds are depth 0
    pub max_depth: u32,

    /// Delay after every fetch attempt
    pub pacing_delay: Duration,

    /// Only absolute links starting with this prefix are followed
    pub domain_prefix: String,
}

impl CrawlSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_depth: config.crawler.max_depth,
            pacing_delay: config.crawler.pacing_delay(),
            domain_prefix: config.site.domain_prefix.clone(),
        }
    }
}

/// A pending page produced by link discovery; lives only during a pass
#[derive(Debug, Clone)]
struct FrontierEntry {
    /// Title fallback: the seed name or the discovering link's text
    name: String,
    url: Url,
    depth: u32,
}

/// Counters for one completed pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PassReport {
    /// Network requests made
    pub pages_fetched: usize,

    /// Documents written (inserted or refreshed)
    pub documents_stored: usize,

    /// Documents that did not exist before this pass
    pub documents_added: usize,

    /// Pages whose fetch or extraction failed
    pub pages_failed: usize,

    /// Worklist entries dropped as already visited
    pub duplicates_skipped: usize,

    /// Store size when the pass finished
    pub total_documents: usize,

    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl PassReport {
    fn record(&mut self, outcome: PageOutcome) {
        if outcome.was_fetched() {
            self.pages_fetched += 1;
        }
        if outcome.is_error() {
            self.pages_failed += 1;
        }
        match outcome {
            PageOutcome::Stored => self.documents_stored += 1,
            PageOutcome::Duplicate => self.duplicates_skipped += 1,
            PageOutcome::FetchFailed | PageOutcome::ExtractFailed => {}
        }
    }
}

/// Orchestrates crawl passes over the configured seed sections
///
/// The crawler owns no global state: the document store is injected, and the
/// last-crawl timestamp lives in the crawler's own [`CrawlStatus`].
pub struct Crawler<F> {
    fetcher: F,
    store: Arc<DocumentStore>,
    settings: CrawlSettings,
    status: CrawlStatus,
    pass_guard: Mutex<()>,
}

impl<F: PageFetcher> Crawler<F> {
    /// Creates a new crawler writing into `store`
    pub fn new(fetcher: F, store: Arc<DocumentStore>, settings: CrawlSettings) -> Self {
        Self {
            fetcher,
            store,
            settings,
            status: CrawlStatus::new(),
            pass_guard: Mutex::new(()),
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn store(&self) -> &Arc<DocumentStore> {
        &self.store
    }

    pub fn settings(&self) -> &CrawlSettings {
        &self.settings
    }

    /// When the most recent full pass completed, if any has
    pub fn last_crawl(&self) -> Option<DateTime<Utc>> {
        self.status.last_crawl()
    }

    /// Returns true while a pass holds the pass guard
    pub fn is_crawling(&self) -> bool {
        self.pass_guard.try_lock().is_err()
    }

    /// Status for reporting: last crawl, pass counts, store size
    pub fn status(&self) -> StatusSnapshot {
        let document_count = self.store.len().unwrap_or_default();
        self.status.snapshot(self.is_crawling(), document_count)
    }

    /// Runs one full pass over `sections`
    ///
    /// Only one pass runs at a time: a call made while another pass is in
    /// flight returns [`IndexError::PassInProgress`] without touching the
    /// store. Per-page failures are logged and never fail the pass; a pass
    /// fails only when the store itself does.
    ///
    /// # Returns
    ///
    /// * `Ok(PassReport)` - Pass completed; the last-crawl timestamp is updated
    /// * `Err(IndexError)` - Pass rejected or failed; stored documents are kept
    pub async fn crawl(&self, sections: &[SeedSection]) -> Result<PassReport, IndexError> {
        let _guard = self
            .pass_guard
            .try_lock()
            .map_err(|_| IndexError::PassInProgress)?;

        match self.run_pass(sections).await {
            Ok(report) => {
                self.status
                    .record_success(report.finished_at.unwrap_or_else(Utc::now));
                Ok(report)
            }
            Err(e) => {
                tracing::error!("Crawl pass failed: {}", e);
                self.status.record_failure(&e.to_string());
                Err(e)
            }
        }
    }

    /// Runs one full pass, abandoning it as soon as `stop` completes
    ///
    /// Returns `None` when the pass was interrupted. The pass guard is
    /// released and documents already written stay in the store; the
    /// last-crawl timestamp is not touched.
    pub async fn crawl_until<S: Future>(
        &self,
        sections: &[SeedSection],
        stop: S,
    ) -> Option<Result<PassReport, IndexError>> {
        tokio::select! {
            result = self.crawl(sections) => Some(result),
            _ = stop => {
                tracing::info!("Crawl pass interrupted");
                None
            }
        }
    }

    async fn run_pass(&self, sections: &[SeedSection]) -> Result<PassReport, IndexError> {
        let start_time = Instant::now();
        let mut report = PassReport {
            started_at: Some(Utc::now()),
            ..PassReport::default()
        };

        let preexisting = self.store.urls()?;
        let mut visited: HashSet<String> = HashSet::new();

        tracing::info!(
            "Starting crawl pass: {} sections, {} documents already indexed",
            sections.len(),
            preexisting.len()
        );

        for section in sections {
            let seed = match canonicalize_url(&section.url) {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!("Skipping section {} ({}): {}", section.name, section.url, e);
                    continue;
                }
            };

            // Seeds are always fetched so scheduled passes refresh them.
            let mut frontier = vec![FrontierEntry {
                name: section.name.clone(),
                url: seed,
                depth: 0,
            }];

            while let Some(entry) = frontier.pop() {
                if !visited.insert(entry.url.to_string()) {
                    report.record(PageOutcome::Duplicate);
                    // Every section is paced, even one already reached as a link
                    if entry.depth == 0 {
                        tokio::time::sleep(self.settings.pacing_delay).await;
                    }
                    continue;
                }

                let outcome = self
                    .visit(&entry, &mut frontier, &visited, &preexisting, &mut report)
                    .await?;
                tracing::trace!("{} -> {}", entry.url, outcome);
                report.record(outcome);

                tokio::time::sleep(self.settings.pacing_delay).await;
            }
        }

        report.total_documents = self.store.len()?;
        report.finished_at = Some(Utc::now());

        tracing::info!(
            "Crawl pass completed in {:?}: {} fetched, {} stored ({} new), {} failed, {} documents indexed",
            start_time.elapsed(),
            report.pages_fetched,
            report.documents_stored,
            report.documents_added,
            report.pages_failed,
            report.total_documents
        );

        Ok(report)
    }

    /// Fetches, extracts, and stores one page, then queues its children
    ///
    /// Children are pushed in reverse document order so the LIFO worklist
    /// visits them in document order, each subtree finished before the next
    /// sibling. A failure abandons the subtree: nothing is queued.
    async fn visit(
        &self,
        entry: &FrontierEntry,
        frontier: &mut Vec<FrontierEntry>,
        visited: &HashSet<String>,
        preexisting: &HashSet<String>,
        report: &mut PassReport,
    ) -> Result<PageOutcome, IndexError> {
        tracing::debug!("Fetching {} (depth {})", entry.url, entry.depth);

        let page = match self.fetcher.fetch(&entry.url).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Abandoning {}: {}", entry.url, e);
                return Ok(PageOutcome::FetchFailed);
            }
        };

        let parsed = match extract_page(&page, &entry.url, &self.settings.domain_prefix) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Abandoning {}: {}", entry.url, e);
                return Ok(PageOutcome::ExtractFailed);
            }
        };

        let document = Document::new(
            entry.url.as_str(),
            parsed.title_or(&entry.name),
            parsed.content.clone(),
        );
        if self.store.upsert(document)? == Upsert::Inserted {
            report.documents_added += 1;
        }

        let child_depth = entry.depth + 1;
        if child_depth > self.settings.max_depth {
            return Ok(PageOutcome::Stored);
        }

        for link in parsed.links.into_iter().rev() {
            let key = link.url.as_str();
            if visited.contains(key) || preexisting.contains(key) {
                continue;
            }
            frontier.push(FrontierEntry {
                name: link.name.unwrap_or_else(|| link.url.to_string()),
                url: link.url,
                depth: child_depth,
            });
        }

        Ok(PageOutcome::Stored)
    }
}
