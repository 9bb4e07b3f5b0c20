//! Data produced by a scrub run

mod outcome;
mod stats;

pub use outcome::{FileOutcome, FileReport, SkipReason};
pub use stats::ScanStats;

/// Everything a run produced, in the order it was reported
#[derive(Debug, Default)]
pub struct ScanResult {
    pub reports: Vec<FileReport>,
    pub stats: ScanStats,
}

impl ScanResult {
    pub fn has_errors(&self) -> bool {
        self.stats.files_failed > 0
    }
}
