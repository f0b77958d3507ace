//! HTML parser for extracting page text and links
//!
//! This module turns a fetched body into:
//! - The page title (first `<title>`)
//! - The visible body text, whitespace-collapsed and bounded in length
//! - Outbound links inside the crawl domain, with their anchor text

use crate::crawler::fetcher::FetchedPage;
use crate::url::{canonicalize_url, within_prefix};
use crate::ExtractError;
use scraper::{ElementRef, Html, Node, Selector};
use std::collections::HashSet;
use url::Url;

/// Upper bound on stored body text, in characters
pub const MAX_CONTENT_CHARS: usize = 1000;

/// Elements whose text never renders
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// A link found on a page, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredLink {
    /// Canonical target URL
    pub url: Url,

    /// Anchor text, used as the title fallback for the target page
    pub name: Option<String>,
}

/// Extracted information from an HTML page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// The page title (from <title> tag)
    pub title: Option<String>,

    /// Visible body text, at most [`MAX_CONTENT_CHARS`] characters
    pub content: String,

    /// In-domain links, deduplicated, in document order
    pub links: Vec<DiscoveredLink>,
}

impl ParsedPage {
    /// The page title, or `fallback` when the page has none
    pub fn title_or(&self, fallback: &str) -> String {
        self.title.clone().unwrap_or_else(|| fallback.to_string())
    }
}

/// Extracts a page from a fetch result
///
/// Fails only when the response declares a body that is not markup at all.
/// Malformed HTML is parsed best-effort: a missing title or an empty link set
/// is not an error.
///
/// # Arguments
///
/// * `page` - The fetched response
/// * `origin` - The URL that was requested, used for error reporting
/// * `link_prefix` - Only absolute links starting with this prefix are kept
pub fn extract_page(
    page: &FetchedPage,
    origin: &Url,
    link_prefix: &str,
) -> Result<ParsedPage, ExtractError> {
    if !is_markup(&page.content_type) {
        return Err(ExtractError::NotMarkup {
            url: origin.to_string(),
            content_type: page.content_type.clone(),
        });
    }

    Ok(parse_html(&page.body, link_prefix))
}

/// Parses HTML content and extracts title, text, and links
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` whose raw href is an absolute URL starting with `link_prefix`
///
/// **Exclude:**
/// - Relative links (they never start with the absolute prefix)
/// - Links to other hosts
/// - Repeats of a link already seen on the page (after canonicalization)
///
/// # Example
///
/// ```
/// use knowledge_index::crawler::parse_html;
///
/// let html = r#"<html><head><title>Test</title></head><body>Hello <a href="https://docs.test/a">A</a></body></html>"#;
/// let parsed = parse_html(html, "https://docs.test");
/// assert_eq!(parsed.title, Some("Test".to_string()));
/// assert_eq!(parsed.content, "Hello A");
/// assert_eq!(parsed.links.len(), 1);
/// ```
pub fn parse_html(html: &str, link_prefix: &str) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        content: extract_content(&document),
        links: extract_links(&document, link_prefix),
    }
}

/// Collapses every run of whitespace into a single space and trims the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns at most `max_chars` characters of `text`, on a char boundary
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

fn is_markup(content_type: &str) -> bool {
    let content_type = content_type.trim().to_ascii_lowercase();
    content_type.is_empty()
        || content_type.starts_with("text/")
        || content_type.contains("html")
        || content_type.contains("xml")
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| collapse_whitespace(&element.text().collect::<String>()))
        .filter(|s| !s.is_empty())
}

/// Extracts the visible text of `<body>`
fn extract_content(document: &Html) -> String {
    let body = Selector::parse("body")
        .ok()
        .and_then(|selector| document.select(&selector).next())
        .unwrap_or_else(|| document.root_element());

    let raw = visible_text(body);
    let collapsed = collapse_whitespace(&raw);
    truncate_chars(&collapsed, MAX_CONTENT_CHARS)
        .trim_end()
        .to_string()
}

fn visible_text(root: ElementRef<'_>) -> String {
    let mut text = String::new();
    for node in root.descendants() {
        if let Node::Text(chunk) = node.value() {
            let hidden = node.ancestors().any(|ancestor| {
                matches!(ancestor.value(), Node::Element(e) if HIDDEN_ELEMENTS.contains(&e.name()))
            });
            if !hidden {
                text.push_str(chunk);
            }
        }
    }
    text
}

/// Extracts in-domain links from the HTML document
fn extract_links(document: &Html, link_prefix: &str) -> Vec<DiscoveredLink> {
    let mut links = Vec::new();
    let mut seen = HashSet::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };

            if !within_prefix(href, link_prefix) {
                continue;
            }

            let url = match canonicalize_url(href) {
                Ok(url) => url,
                Err(e) => {
                    tracing::trace!("Skipping link {}: {}", href, e);
                    continue;
                }
            };

            if !seen.insert(url.to_string()) {
                continue;
            }

            let name = collapse_whitespace(&element.text().collect::<String>());
            links.push(DiscoveredLink {
                url,
                name: (!name.is_empty()).then_some(name),
            });
        }
    }

    links
}
