//! Directory traversal and file dispatch pipeline

use super::file::FileProcessor;
use crate::scan::{
    config::ScanOptions,
    data::{FileOutcome, FileReport, ScanResult, SkipReason},
    error::{Result, ScrubError},
    filters::{
        AdmissionFilter, Filter, FilterDecision, IgnoreMatcher, TextClassifier,
        directory::is_hidden,
    },
    permission::PermissionProbe,
};
use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Receives progress while a walk is running
pub trait ScanObserver {
    /// Called when a directory is taken off the queue
    fn directory_entered(&mut self, _directory: &Path) {}

    /// Called for every report, as soon as it is produced
    fn reported(&mut self, report: &FileReport);
}

impl<F: FnMut(&FileReport)> ScanObserver for F {
    fn reported(&mut self, report: &FileReport) {
        self(report)
    }
}

/// Breadth-first walker over the scan root
///
/// Owns the per-run caches: ignore rules keyed by directory and permission
/// verdicts keyed by path. Each directory is queued at most once, by its
/// parent, and its ignore rules are loaded before any child is admitted.
pub struct Walker<'a> {
    options: &'a ScanOptions,
    ignore: IgnoreMatcher,
    probe: PermissionProbe,
    classifier: TextClassifier,
}

impl<'a> Walker<'a> {
    pub fn new(options: &'a ScanOptions) -> Self {
        Self {
            options,
            ignore: IgnoreMatcher::new(),
            probe: PermissionProbe::new(),
            classifier: TextClassifier::new(),
        }
    }

    /// Walk the tree, collecting reports without a live observer
    pub fn run(&mut self) -> Result<ScanResult> {
        self.run_with(&mut |_: &FileReport| {})
    }

    /// Walk the tree, streaming every report to `observer`
    ///
    /// Fails only with [`ScrubError::RootUnavailable`], before anything is
    /// visited. In a dry run an unusable root is reported as an error outcome
    /// and the result is otherwise empty.
    pub fn run_with(&mut self, observer: &mut dyn ScanObserver) -> Result<ScanResult> {
        let start_time = Instant::now();
        let mut result = ScanResult::default();

        let root = match self.prepare_root() {
            Ok(root) => root,
            Err(err) if !err.is_fatal() => {
                tracing::error!("Cannot scan {}: {}", self.options.root().display(), err);
                let report = FileReport::new(self.options.root(), FileOutcome::Error(err));
                emit(&mut result, observer, report);
                result.stats.scan_duration_ms = start_time.elapsed().as_millis() as u64;
                return Ok(result);
            }
            Err(err) => return Err(err),
        };

        let mut processor = FileProcessor::new(self.options);
        let mut queue = VecDeque::from([root.clone()]);

        while let Some(current) = queue.pop_front() {
            observer.directory_entered(&current);
            let rules = self.ignore.load_patterns(&current);

            if !self.options.dry_run && !self.probe.can_write(&current) {
                tracing::warn!("Skipping directory {}: not writable", current.display());
                let outcome = FileOutcome::Skipped(SkipReason::DirectoryNotWritable);
                emit(&mut result, observer, FileReport::new(current, outcome));
                continue;
            }

            let children = match self.list_children(&current) {
                Ok(children) => children,
                Err(e) => {
                    tracing::error!("Failed to list {}: {}", current.display(), e);
                    let err = ScrubError::from_read(&current, e);
                    emit(&mut result, observer, FileReport::new(current, FileOutcome::Error(err)));
                    continue;
                }
            };
            result.stats.directories_traversed += 1;

            let admission = AdmissionFilter::new(&root, &rules, self.options.force);
            for (path, file_type) in children {
                if let FilterDecision::Skip(reason) = admission.filter(&path) {
                    tracing::debug!("Excluded {}: {}", path.display(), reason);
                    result.stats.entries_excluded += 1;
                    continue;
                }

                if file_type.is_dir() {
                    queue.push_back(path);
                } else if file_type.is_file() {
                    if let FilterDecision::Skip(reason) = self.classifier.filter(&path) {
                        tracing::debug!("Skipped {}: {}", path.display(), reason);
                        result.stats.binary_files_skipped += 1;
                        continue;
                    }
                    let outcome = processor.process(&path, &mut self.probe);
                    emit(&mut result, observer, FileReport::new(path, outcome));
                } else {
                    tracing::debug!("Skipped {}: not a regular file or directory", path.display());
                    result.stats.entries_excluded += 1;
                }
            }
        }

        result.stats.bytes_written = processor.bytes_written();
        result.stats.scan_duration_ms = start_time.elapsed().as_millis() as u64;
        tracing::debug!(
            "Walk finished: {} directories, {} ignore rule sets cached",
            result.stats.directories_traversed,
            self.ignore.cached_directories()
        );
        Ok(result)
    }

    /// Canonicalize the root and make sure a non-dry run can write to it
    ///
    /// A missing or non-directory root is fatal only when files would be
    /// written; a dry run gets the plain read classification instead.
    fn prepare_root(&mut self) -> Result<PathBuf> {
        let options = self.options;
        let requested = options.root();
        let resolved = fs::canonicalize(requested).and_then(|root| {
            if root.is_dir() {
                Ok(root)
            } else {
                Err(io::Error::new(io::ErrorKind::NotADirectory, "not a directory"))
            }
        });
        let root = match resolved {
            Ok(root) => root,
            Err(e) if options.dry_run => return Err(ScrubError::from_read(requested, e)),
            Err(e) => {
                return Err(ScrubError::RootUnavailable {
                    path: requested.to_path_buf(),
                    source: Some(e),
                });
            }
        };

        if !options.dry_run && !self.probe.can_write(&root) {
            return Err(ScrubError::RootUnavailable { path: root, source: None });
        }

        Ok(root)
    }

    /// Immediate children sorted by name. Hidden entries are listed only with `force`.
    fn list_children(&self, directory: &Path) -> io::Result<Vec<(PathBuf, fs::FileType)>> {
        let mut children = Vec::new();
        for entry in fs::read_dir(directory)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Error reading entry in {}: {}", directory.display(), e);
                    continue;
                }
            };
            let path = entry.path();
            if !self.options.force && is_hidden(&path) {
                continue;
            }
            match entry.file_type() {
                Ok(file_type) => children.push((path, file_type)),
                Err(e) => tracing::warn!("Cannot stat {}: {}", path.display(), e),
            }
        }
        children.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(children)
    }
}

fn emit(result: &mut ScanResult, observer: &mut dyn ScanObserver, report: FileReport) {
    result.stats.record(&report.outcome);
    observer.reported(&report);
    result.reports.push(report);
}
