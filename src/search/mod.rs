//! Substring search over the document store
//!
//! A document matches when the query, compared case-insensitively, appears
//! in its title or its content. Matches come back in store insertion order
//! and the first `limit` win; there is no relevance scoring. The empty query
//! is a substring of everything, so it matches every document.

mod context;

pub use context::build_context;

use crate::config::SearchConfig;
use crate::store::{Document, DocumentStore, StoreResult};
use serde::Serialize;
use std::sync::Arc;

/// Characters of content shown in a hit's excerpt
pub const EXCERPT_CHARS: usize = 200;

/// Marker appended to every excerpt
pub const EXCERPT_ELLIPSIS: &str = "...";

/// One search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub title: String,

    /// First [`EXCERPT_CHARS`] characters of content plus [`EXCERPT_ELLIPSIS`]
    pub excerpt: String,

    /// Source URL of the matched document
    pub url: String,
}

impl SearchHit {
    fn from_document(document: &Document) -> Self {
        Self {
            title: document.title.clone(),
            excerpt: excerpt(&document.content),
            url: document.url.clone(),
        }
    }
}

/// Builds the excerpt shown for a document's content
pub fn excerpt(content: &str) -> String {
    let prefix: String = content.chars().take(EXCERPT_CHARS).collect();
    format!("{}{}", prefix, EXCERPT_ELLIPSIS)
}

/// Read-only query interface over a [`DocumentStore`]
#[derive(Debug, Clone)]
pub struct SearchIndex {
    store: Arc<DocumentStore>,
    limits: SearchConfig,
}

impl SearchIndex {
    /// Creates an index with the default limits (3 for context, 5 for search)
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self::with_limits(store, SearchConfig::default())
    }

    pub fn with_limits(store: Arc<DocumentStore>, limits: SearchConfig) -> Self {
        Self { store, limits }
    }

    /// Returns at most `limit` documents containing `query` in title or content
    pub fn search(&self, query: &str, limit: usize) -> StoreResult<Vec<SearchHit>> {
        let mut hits = Vec::new();
        if limit == 0 {
            return Ok(hits);
        }

        let needle = query.to_lowercase();
        self.store.scan(|document| {
            if matches(document, &needle) {
                hits.push(SearchHit::from_document(document));
            }
            hits.len() < limit
        })?;

        Ok(hits)
    }

    /// Direct search with the configured result limit
    pub fn search_default(&self, query: &str) -> StoreResult<Vec<SearchHit>> {
        self.search(query, self.limits.result_limit)
    }

    /// Context string for a completion request, from the configured number of hits
    pub fn context_for(&self, query: &str) -> StoreResult<String> {
        let hits = self.search(query, self.limits.context_limit)?;
        Ok(build_context(&hits))
    }
}

fn matches(document: &Document, needle: &str) -> bool {
    document.title.to_lowercase().contains(needle)
        || document.content.to_lowercase().contains(needle)
}
