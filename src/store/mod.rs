//! In-memory document store
//!
//! The store maps canonical URLs to [`Document`]s. It is created empty at
//! process start, written only by the crawler, and never cleared. Iteration
//! follows first-insertion order; overwriting a URL keeps its position.
//!
//! The store is an owned value shared through `Arc`, so every crawler and
//! search index in a test can be handed its own isolated instance.

mod document;

pub use document::Document;

use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document store lock poisoned")]
    Poisoned,
}

impl<T> From<PoisonError<T>> for StoreError {
    fn from(_: PoisonError<T>) -> Self {
        StoreError::Poisoned
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Whether an upsert created a new entry or replaced an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Replaced,
}

#[derive(Debug, Default)]
struct Entries {
    documents: Vec<Document>,
    positions: HashMap<String, usize>,
}

/// URL-keyed document map shared between the crawler and search
///
/// All methods take the lock for the duration of a single call and return
/// owned data, so no guard is ever held across an `.await`.
#[derive(Debug, Default)]
pub struct DocumentStore {
    entries: RwLock<Entries>,
}

impl DocumentStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Entries>> {
        Ok(self.entries.read()?)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Entries>> {
        Ok(self.entries.write()?)
    }

    /// Inserts a document, or replaces the one stored under the same URL
    pub fn upsert(&self, document: Document) -> StoreResult<Upsert> {
        let mut entries = self.write()?;
        match entries.positions.get(&document.url).copied() {
            Some(position) => {
                entries.documents[position] = document;
                Ok(Upsert::Replaced)
            }
            None => {
                let position = entries.documents.len();
                entries.positions.insert(document.url.clone(), position);
                entries.documents.push(document);
                Ok(Upsert::Inserted)
            }
        }
    }

    /// Gets a copy of the document stored for `url`
    pub fn get(&self, url: &str) -> StoreResult<Option<Document>> {
        let entries = self.read()?;
        Ok(entries
            .positions
            .get(url)
            .map(|&position| entries.documents[position].clone()))
    }

    pub fn contains(&self, url: &str) -> StoreResult<bool> {
        Ok(self.read()?.positions.contains_key(url))
    }

    /// Number of stored documents
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.documents.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Every stored URL, used by the crawler to seed its visited set
    pub fn urls(&self) -> StoreResult<HashSet<String>> {
        Ok(self.read()?.positions.keys().cloned().collect())
    }

    /// Runs `f` over the documents in insertion order under one read lock
    ///
    /// Iteration stops as soon as `f` returns `false`.
    pub fn scan<F>(&self, mut f: F) -> StoreResult<()>
    where
        F: FnMut(&Document) -> bool,
    {
        let entries = self.read()?;
        for document in &entries.documents {
            if !f(document) {
                break;
            }
        }
        Ok(())
    }

    /// Copies all documents out in insertion order
    pub fn snapshot(&self) -> StoreResult<Vec<Document>> {
        Ok(self.read()?.documents.clone())
    }
}
