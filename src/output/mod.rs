//! Console reporting for the command-line interface
//!
//! This module handles:
//! - Pass reports after a manual or one-shot crawl
//! - Crawl status snapshots
//! - Search hits and the context string built from them
//!
//! Every `print_*` function has a `format_*` counterpart returning the text,
//! which is what the tests exercise.

mod report;

pub use report::{
    format_hits, format_pass_report, format_status, print_context, print_hits,
    print_pass_report, print_status,
};
