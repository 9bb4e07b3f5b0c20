//! Counters for a scrub run

use super::outcome::{FileOutcome, SkipReason};
use serde::Serialize;

#[derive(Debug, Default, Clone, Serialize)]
pub struct ScanStats {
    // Traversal
    pub directories_traversed: usize,
    pub directories_skipped: usize,
    pub entries_excluded: usize,
    pub binary_files_skipped: usize,

    // Per-file outcomes
    pub files_cleaned: usize,
    pub files_would_change: usize,
    pub files_skipped: usize,
    pub files_failed: usize,

    pub bytes_written: u64,
    pub scan_duration_ms: u64,
}

impl ScanStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one reported outcome
    pub fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Cleaned => self.files_cleaned += 1,
            FileOutcome::WouldChange => self.files_would_change += 1,
            FileOutcome::Skipped(SkipReason::DirectoryNotWritable) => self.directories_skipped += 1,
            FileOutcome::Skipped(SkipReason::NoWritePermission) => self.files_skipped += 1,
            FileOutcome::Error(_) => self.files_failed += 1,
        }
    }
}
