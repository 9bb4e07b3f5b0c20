//! Per-file processing: permission check, read, rewrite, write-back

use crate::scan::{
    config::ScanOptions,
    data::{FileOutcome, SkipReason},
    error::{Result, ScrubError},
    permission::PermissionProbe,
    rewrite,
};
use std::fs::{self, File};
use std::path::Path;
use std::time::SystemTime;

/// Rewrites single text files according to the run options
///
/// Errors never escape [`FileProcessor::process`]; they become
/// [`FileOutcome::Error`] so the walk carries on with the next file.
pub struct FileProcessor<'a> {
    options: &'a ScanOptions,
    bytes_written: u64,
}

impl<'a> FileProcessor<'a> {
    pub fn new(options: &'a ScanOptions) -> Self {
        Self {
            options,
            bytes_written: 0,
        }
    }

    /// Total bytes written back so far
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn process(&mut self, path: &Path, probe: &mut PermissionProbe) -> FileOutcome {
        if !self.options.dry_run && !probe.can_write(path) {
            tracing::warn!("Skipping {}: no write permission", path.display());
            return FileOutcome::Skipped(SkipReason::NoWritePermission);
        }

        match self.rewrite_file(path) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("Failed to process {}: {}", path.display(), e);
                FileOutcome::Error(e)
            }
        }
    }

    fn rewrite_file(&mut self, path: &Path) -> Result<FileOutcome> {
        let metadata = fs::metadata(path).map_err(|e| ScrubError::from_read(path, e))?;
        let original = fs::read_to_string(path).map_err(|e| ScrubError::from_read(path, e))?;

        let cleaned = rewrite::transform(&original, self.options.line_ending);

        if self.options.dry_run {
            tracing::info!("Would clean {}", path.display());
            return Ok(FileOutcome::WouldChange);
        }

        fs::write(path, cleaned.as_bytes()).map_err(|e| ScrubError::write_failure(path, e))?;
        self.bytes_written += cleaned.len() as u64;
        tracing::info!("Cleaned {}", path.display());

        if self.options.preserve_timestamp {
            match metadata.modified() {
                Ok(modified) => restore_modified(path, modified),
                Err(e) => tracing::warn!("No modification time for {}: {}", path.display(), e),
            }
        }

        Ok(FileOutcome::Cleaned)
    }
}

/// Put back the original modification time; failures are only logged
fn restore_modified(path: &Path, modified: SystemTime) {
    let restored = File::options()
        .write(true)
        .open(path)
        .and_then(|file| file.set_modified(modified));
    if let Err(e) = restored {
        tracing::warn!("Failed to restore timestamp on {}: {}", path.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::config::LineEnding;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_cleans_file_in_place() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.txt");
        fs::write(&file, "h\u{200B}ello\r\n").unwrap();

        let options = ScanOptions::new(temp_dir.path()).line_ending(LineEnding::ToLf);
        let mut processor = FileProcessor::new(&options);
        let outcome = processor.process(&file, &mut PermissionProbe::new());

        assert!(matches!(outcome, FileOutcome::Cleaned));
        assert_eq!(fs::read_to_string(&file).unwrap(), "hello\n");
        assert_eq!(processor.bytes_written(), 6);
    }

    #[test]
    fn test_dry_run_leaves_file_alone() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.txt");
        fs::write(&file, "\u{0430}\u{200D}b").unwrap();
        let before = fs::metadata(&file).unwrap().modified().unwrap();

        let options = ScanOptions::new(temp_dir.path()).dry_run(true);
        let outcome = FileProcessor::new(&options).process(&file, &mut PermissionProbe::new());

        assert!(matches!(outcome, FileOutcome::WouldChange));
        assert_eq!(fs::read_to_string(&file).unwrap(), "\u{0430}\u{200D}b");
        assert_eq!(fs::metadata(&file).unwrap().modified().unwrap(), before);
    }

    #[test]
    fn test_dry_run_reports_even_without_changes() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("clean.txt");
        fs::write(&file, "already clean").unwrap();

        let options = ScanOptions::new(temp_dir.path()).dry_run(true);
        let outcome = FileProcessor::new(&options).process(&file, &mut PermissionProbe::new());
        assert!(matches!(outcome, FileOutcome::WouldChange));
    }

    #[test]
    fn test_preserves_timestamp() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.txt");
        fs::write(&file, "x\u{FEFF}y").unwrap();

        let old = SystemTime::now() - Duration::from_secs(86_400);
        File::options().write(true).open(&file).unwrap().set_modified(old).unwrap();
        let before = fs::metadata(&file).unwrap().modified().unwrap();

        let options = ScanOptions::new(temp_dir.path()).preserve_timestamp(true);
        let outcome = FileProcessor::new(&options).process(&file, &mut PermissionProbe::new());

        assert!(matches!(outcome, FileOutcome::Cleaned));
        assert_eq!(fs::read_to_string(&file).unwrap(), "xy");
        assert_eq!(fs::metadata(&file).unwrap().modified().unwrap(), before);
    }

    #[test]
    fn test_invalid_utf8_is_decode_error() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("latin1.txt");
        fs::write(&file, b"caf\xe9").unwrap();

        let options = ScanOptions::new(temp_dir.path());
        let outcome = FileProcessor::new(&options).process(&file, &mut PermissionProbe::new());

        match outcome {
            FileOutcome::Error(err) => assert_eq!(err.kind(), "decode_error"),
            other => panic!("expected decode error, got {:?}", other),
        }
        assert_eq!(fs::read(&file).unwrap(), b"caf\xe9");
    }

    #[test]
    fn test_vanished_file_is_skipped_or_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("gone.txt");

        // Without dry run the probe fails first
        let options = ScanOptions::new(temp_dir.path());
        let outcome = FileProcessor::new(&options).process(&file, &mut PermissionProbe::new());
        assert!(matches!(outcome, FileOutcome::Skipped(SkipReason::NoWritePermission)));

        let options = ScanOptions::new(temp_dir.path()).dry_run(true);
        let outcome = FileProcessor::new(&options).process(&file, &mut PermissionProbe::new());
        match outcome {
            FileOutcome::Error(err) => assert_eq!(err.kind(), "not_found"),
            other => panic!("expected not found, got {:?}", other),
        }
    }
}
