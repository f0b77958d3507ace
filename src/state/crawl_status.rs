use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Process-wide record of crawl pass outcomes
///
/// The last-crawl timestamp stays `None` until a full pass completes
/// successfully; failed passes never move it.
#[derive(Debug, Default)]
pub struct CrawlStatus {
    inner: Mutex<StatusInner>,
}

#[derive(Debug, Default, Clone)]
struct StatusInner {
    last_crawl: Option<DateTime<Utc>>,
    passes_completed: u64,
    passes_failed: u64,
    last_error: Option<String>,
}

/// Point-in-time copy of the crawl status, for status reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSnapshot {
    pub last_crawl: Option<DateTime<Utc>>,
    pub passes_completed: u64,
    pub passes_failed: u64,
    pub last_error: Option<String>,
    pub crawl_in_progress: bool,
    pub document_count: usize,
}

impl CrawlStatus {
    pub fn new() -> Self {
        Self::default()
    }

    // Status counters stay meaningful even if a holder panicked.
    fn lock(&self) -> MutexGuard<'_, StatusInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records a successful full pass finishing at `finished_at`
    pub fn record_success(&self, finished_at: DateTime<Utc>) {
        let mut inner = self.lock();
        inner.last_crawl = Some(finished_at);
        inner.passes_completed += 1;
    }

    /// Records a pass that failed with `error`
    pub fn record_failure(&self, error: &str) {
        let mut inner = self.lock();
        inner.passes_failed += 1;
        inner.last_error = Some(error.to_string());
    }

    pub fn last_crawl(&self) -> Option<DateTime<Utc>> {
        self.lock().last_crawl
    }

    pub fn passes_completed(&self) -> u64 {
        self.lock().passes_completed
    }

    pub fn passes_failed(&self) -> u64 {
        self.lock().passes_failed
    }

    /// Builds a snapshot, filling in the fields owned by the caller
    pub fn snapshot(&self, crawl_in_progress: bool, document_count: usize) -> StatusSnapshot {
        let inner = self.lock().clone();
        StatusSnapshot {
            last_crawl: inner.last_crawl,
            passes_completed: inner.passes_completed,
            passes_failed: inner.passes_failed,
            last_error: inner.last_error,
            crawl_in_progress,
            document_count,
        }
    }
}
