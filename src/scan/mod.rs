//! Scrub engine - walks a tree and strips invisible and confusable Unicode
//!
//! The walker admits entries through the filters, hands text files to the
//! file processor, and the processor runs the rewrite pipeline before
//! writing the result back.

pub mod config;
pub mod data;
pub mod error;
pub mod filters;
pub mod permission;
pub mod pipeline;
pub mod rewrite;

pub use config::{LineEnding, ScanOptions};
pub use data::{FileOutcome, FileReport, ScanResult, ScanStats, SkipReason};
pub use error::ScrubError;
pub use pipeline::{FileProcessor, ScanObserver, Walker};
pub use rewrite::transform;

/// Run a scrub over `options.root` without a live observer
pub fn run(options: &ScanOptions) -> error::Result<ScanResult> {
    Walker::new(options).run()
}
