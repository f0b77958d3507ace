use crate::crawler::PassReport;
use crate::search::SearchHit;
use crate::state::StatusSnapshot;
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// Renders a pass report
///
/// # Arguments
///
/// * `report` - Counters from a completed pass
pub fn format_pass_report(report: &PassReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Crawl Pass ===\n");
    let _ = writeln!(out, "Pages fetched: {}", report.pages_fetched);
    let _ = writeln!(
        out,
        "Documents stored: {} ({} new)",
        report.documents_stored, report.documents_added
    );
    let _ = writeln!(out, "Pages failed: {}", report.pages_failed);
    let _ = writeln!(out, "Duplicates skipped: {}", report.duplicates_skipped);
    let _ = writeln!(out, "Total documents: {}", report.total_documents);

    if let (Some(started), Some(finished)) = (report.started_at, report.finished_at) {
        let seconds = (finished - started).num_milliseconds() as f64 / 1000.0;
        let _ = writeln!(out, "Duration: {:.1}s", seconds);
    }

    // Success rate over fetched pages only
    if report.pages_fetched > 0 {
        let rate = report.documents_stored as f64 / report.pages_fetched as f64 * 100.0;
        let _ = writeln!(
            out,
            "Success Rate: {:.1}% ({} / {} pages stored)",
            rate, report.documents_stored, report.pages_fetched
        );
    }
    out
}

/// Renders a status snapshot
pub fn format_status(status: &StatusSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Index Status ===\n");
    let _ = writeln!(out, "Documents: {}", status.document_count);
    let _ = writeln!(out, "Last crawl: {}", describe_time(status.last_crawl));
    let _ = writeln!(
        out,
        "Passes: {} completed, {} failed",
        status.passes_completed, status.passes_failed
    );
    if status.crawl_in_progress {
        let _ = writeln!(out, "A crawl pass is in progress");
    }
    if let Some(error) = &status.last_error {
        let _ = writeln!(out, "Last error: {}", error);
    }
    out
}

/// Renders search hits as a numbered list
pub fn format_hits(query: &str, hits: &[SearchHit]) -> String {
    let mut out = String::new();
    if hits.is_empty() {
        let _ = writeln!(out, "No documents match \"{}\"", query);
        return out;
    }

    let _ = writeln!(out, "{} result(s) for \"{}\":\n", hits.len(), query);
    for (i, hit) in hits.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, hit.title);
        let _ = writeln!(out, "   {}", hit.url);
        let _ = writeln!(out, "   {}", hit.excerpt);
    }
    out
}

fn describe_time(time: Option<DateTime<Utc>>) -> String {
    match time {
        Some(t) => t.to_rfc3339(),
        None => "never".to_string(),
    }
}

pub fn print_pass_report(report: &PassReport) {
    print!("{}", format_pass_report(report));
}

pub fn print_status(status: &StatusSnapshot) {
    print!("{}", format_status(status));
}

pub fn print_hits(query: &str, hits: &[SearchHit]) {
    print!("{}", format_hits(query, hits));
}

/// Prints the context block a completion request would carry
pub fn print_context(context: &str) {
    if context.is_empty() {
        return;
    }
    println!("\n--- Context ---\n{}", context);
}
