//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlStatus`: process-wide pass outcomes and the last-crawl timestamp
//! - `PageOutcome`: what happened to one frontier entry within a pass

mod crawl_status;
mod page_outcome;

// Re-export main types
pub use crawl_status::{CrawlStatus, StatusSnapshot};
pub use page_outcome::PageOutcome;
