//! Configuration module for Knowledge-Index
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use knowledge_index::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("knowledge-index.toml")).unwrap();
//! println!("Crawling {} sections", config.sections.len());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, SearchConfig, SeedSection, SiteConfig, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
