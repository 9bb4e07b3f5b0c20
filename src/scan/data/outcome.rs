use crate::scan::error::ScrubError;
use std::fmt;
use std::path::PathBuf;

/// Why a file or directory was left alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The permission probe rejected the file
    NoWritePermission,
    /// The permission probe rejected the directory; its children were never listed
    DirectoryNotWritable,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoWritePermission => "no write permission",
            Self::DirectoryNotWritable => "directory not writable",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of handling one file (or one pruned directory)
#[derive(Debug)]
pub enum FileOutcome {
    /// New content was written back
    Cleaned,
    /// Dry run: a rewrite would have been attempted
    WouldChange,
    Skipped(SkipReason),
    Error(ScrubError),
}

impl FileOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cleaned => "cleaned",
            Self::WouldChange => "would_change",
            Self::Skipped(_) => "skipped",
            Self::Error(_) => "error",
        }
    }

    /// Human-readable reason for skips and errors
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::Cleaned | Self::WouldChange => None,
            Self::Skipped(reason) => Some(reason.to_string()),
            Self::Error(err) => Some(error_chain(err)),
        }
    }
}

fn error_chain(err: &ScrubError) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Outcome paired with the path it concerns
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

impl FileReport {
    pub fn new(path: impl Into<PathBuf>, outcome: FileOutcome) -> Self {
        Self {
            path: path.into(),
            outcome,
        }
    }
}
