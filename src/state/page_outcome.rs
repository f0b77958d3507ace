//! Outcome definitions for a single frontier entry within a pass
use std::fmt;

/// What happened to one frontier entry during a crawl pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageOutcome {
    /// Fetched, extracted, and written to the store
    Stored,

    /// Already visited in this pass, or already stored before it started
    Duplicate,

    /// The fetch failed (timeout, network, non-success status)
    FetchFailed,

    /// The body could not be treated as markup
    ExtractFailed,
}

impl PageOutcome {
    /// Returns true if the page's subtree was abandoned because of an error
    pub fn is_error(&self) -> bool {
        matches!(self, Self::FetchFailed | Self::ExtractFailed)
    }

    /// Returns true if a network request was made for this entry
    pub fn was_fetched(&self) -> bool {
        !matches!(self, Self::Duplicate)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stored => "stored",
            Self::Duplicate => "duplicate",
            Self::FetchFailed => "fetch_failed",
            Self::ExtractFailed => "extract_failed",
        }
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
