//! Scheduler for periodic crawl passes
//!
//! This module handles:
//! - A repeating timer that runs a full pass every interval
//! - A manual trigger that runs a pass on demand
//! - Clean shutdown of the background task
//!
//! Overlapping passes are rejected by the crawler's pass guard: a tick that
//! lands while a manual pass runs is skipped, and vice versa.

use crate::config::{Config, SeedSection};
use crate::crawler::coordinator::{Crawler, PassReport};
use crate::crawler::fetcher::PageFetcher;
use crate::IndexError;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Timer configuration for scheduled passes
#[derive(Debug, Clone)]
pub struct ScheduleSettings {
    /// Time between scheduled passes
    pub interval: Duration,

    /// Whether the first pass runs at start instead of one interval later
    pub run_immediately: bool,
}

impl ScheduleSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            interval: config.crawler.recrawl_interval(),
            run_immediately: config.crawler.crawl_on_start,
        }
    }
}

/// Owns the background re-crawl task
///
/// Dropping the scheduler aborts the task; [`CrawlScheduler::shutdown`]
/// stops it and waits for it to finish.
pub struct CrawlScheduler<F> {
    crawler: Arc<Crawler<F>>,
    sections: Arc<[SeedSection]>,
    shutdown: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl<F: PageFetcher + 'static> CrawlScheduler<F> {
    /// Arms the repeating timer and returns the owning handle
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(
        crawler: Arc<Crawler<F>>,
        sections: Vec<SeedSection>,
        settings: ScheduleSettings,
    ) -> Self {
        let sections: Arc<[SeedSection]> = sections.into();
        let (shutdown, shutdown_rx) = watch::channel(false);

        tracing::info!(
            "Scheduling crawl passes every {:?} (first pass {})",
            settings.interval,
            if settings.run_immediately {
                "now"
            } else {
                "after one interval"
            }
        );

        let handle = tokio::spawn(run_schedule(
            Arc::clone(&crawler),
            Arc::clone(&sections),
            settings,
            shutdown_rx,
        ));

        Self {
            crawler,
            sections,
            shutdown,
            handle: Some(handle),
        }
    }

    /// Runs a full pass now, independent of the timer
    ///
    /// Returns [`IndexError::PassInProgress`] if a pass is already running.
    pub async fn trigger(&self) -> Result<PassReport, IndexError> {
        tracing::info!("Manual crawl pass requested");
        self.crawler.crawl(&self.sections).await
    }

    /// Like [`CrawlScheduler::trigger`], but gives up when `stop` completes
    pub async fn trigger_until<S: Future>(
        &self,
        stop: S,
    ) -> Option<Result<PassReport, IndexError>> {
        tracing::info!("Manual crawl pass requested");
        self.crawler.crawl_until(&self.sections, stop).await
    }

    pub fn crawler(&self) -> &Arc<Crawler<F>> {
        &self.crawler
    }

    pub fn sections(&self) -> &[SeedSection] {
        &self.sections
    }

    /// Stops the timer and waits for the background task to exit
    ///
    /// A scheduled pass still in flight is cancelled at its next await point;
    /// documents it already stored are kept.
    pub async fn shutdown(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::warn!("Crawl scheduler task ended abnormally: {}", e);
            }
        }
        tracing::info!("Crawl scheduler stopped");
    }
}

impl<F> Drop for CrawlScheduler<F> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

async fn run_schedule<F: PageFetcher>(
    crawler: Arc<Crawler<F>>,
    sections: Arc<[SeedSection]>,
    settings: ScheduleSettings,
    mut shutdown: watch::Receiver<bool>,
) {
    let first_tick = if settings.run_immediately {
        Instant::now()
    } else {
        Instant::now() + settings.interval
    };
    let mut ticker = interval_at(first_tick, settings.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown.changed() => break,
            _ = ticker.tick() => {}
        }

        tracing::info!("Scheduled crawl pass starting");
        tokio::select! {
            _ = shutdown.changed() => {
                tracing::info!("Shutdown requested during scheduled pass");
                break;
            }
            result = crawler.crawl(&sections) => match result {
                Ok(report) => tracing::info!(
                    "Scheduled crawl pass finished: {} documents indexed",
                    report.total_documents
                ),
                Err(IndexError::PassInProgress) => {
                    tracing::info!("Skipping scheduled pass: another pass is in progress")
                }
                Err(e) => tracing::error!("Scheduled crawl pass failed: {}", e),
            }
        }
    }
}
