use crate::search::SearchHit;

/// Joins hits into the context block handed to the completion service
///
/// Each hit contributes its title, excerpt, and source URL. No hits yields
/// an empty string.
pub fn build_context(hits: &[SearchHit]) -> String {
    hits.iter()
        .map(|hit| {
            format!(
                "Title: {}\nExcerpt: {}\nSource: {}",
                hit.title, hit.excerpt, hit.url
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
