use serde::Serialize;

/// One indexed page
///
/// Documents are built in full by the crawler and replaced wholesale on
/// re-crawl, so a reader never sees a half-written page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Canonical absolute URL, the store key
    pub url: String,

    /// Page title, or the seed/link name when the page has none
    pub title: String,

    /// Whitespace-collapsed body text, bounded in length
    pub content: String,
}

impl Document {
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            content: content.into(),
        }
    }
}
