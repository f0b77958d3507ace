//! URL handling module for Knowledge-Index
//!
//! This module provides URL canonicalization and the crawl-domain prefix
//! check that keeps link discovery on the documentation site.

mod normalize;

pub use normalize::canonicalize_url;

/// Returns true if `href` is an absolute link inside the crawl domain
///
/// Only absolute URLs are considered: relative hrefs never match, because the
/// prefix check is a plain string comparison on the raw attribute value.
///
/// # Examples
///
/// ```
/// use knowledge_index::url::within_prefix;
///
/// assert!(within_prefix("https://knowledge.eptura.com/condeco/desks", "https://knowledge.eptura.com"));
/// assert!(!within_prefix("/condeco/desks", "https://knowledge.eptura.com"));
/// ```
pub fn within_prefix(href: &str, prefix: &str) -> bool {
    !prefix.is_empty() && href.trim().starts_with(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "https://knowledge.eptura.com";

    #[test]
    fn test_absolute_link_in_domain() {
        assert!(within_prefix("https://knowledge.eptura.com/archibus", PREFIX));
        assert!(within_prefix("  https://knowledge.eptura.com/x ", PREFIX));
    }

    #[test]
    fn test_other_domain_rejected() {
        assert!(!within_prefix("https://www.eptura.com/pricing", PREFIX));
        assert!(!within_prefix("http://knowledge.eptura.com/archibus", PREFIX));
    }

    #[test]
    fn test_relative_link_rejected() {
        assert!(!within_prefix("/archibus", PREFIX));
        assert!(!within_prefix("archibus", PREFIX));
        assert!(!within_prefix("#top", PREFIX));
    }

    #[test]
    fn test_empty_prefix_matches_nothing() {
        assert!(!within_prefix("https://knowledge.eptura.com/archibus", ""));
    }
}
