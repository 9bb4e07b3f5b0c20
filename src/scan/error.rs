//! Error taxonomy for the scrub pipeline
//!
//! Every per-file and per-directory failure is folded into one of these
//! kinds and reported; only [`ScrubError::RootUnavailable`] stops a run.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrubError>;

#[derive(Debug, Error)]
pub enum ScrubError {
    /// The permission probe or a host I/O call was rejected
    #[error("access denied: {}", path.display())]
    AccessDenied {
        path: PathBuf,
        #[source]
        source: Option<io::Error>,
    },

    /// The path vanished between enumeration and processing
    #[error("not found: {}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: Option<io::Error>,
    },

    /// Content passed the binary heuristic but is not valid UTF-8
    #[error("cannot decode {} as UTF-8 text", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Write-back failed after a successful read and rewrite
    #[error("failed to write {}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The scan root cannot be written and this is not a dry run
    #[error("scan root is not available for writing: {}", path.display())]
    RootUnavailable {
        path: PathBuf,
        #[source]
        source: Option<io::Error>,
    },
}

impl ScrubError {
    /// Classify an error raised while reading `path`
    pub fn from_read(path: &Path, err: io::Error) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path, source: Some(err) },
            io::ErrorKind::InvalidData => Self::Decode { path, source: err },
            _ => Self::AccessDenied { path, source: Some(err) },
        }
    }

    pub fn write_failure(path: &Path, err: io::Error) -> Self {
        Self::WriteFailure { path: path.to_path_buf(), source: err }
    }

    /// Only an unavailable root aborts the run
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::RootUnavailable { .. })
    }

    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AccessDenied { .. } => "access_denied",
            Self::NotFound { .. } => "not_found",
            Self::Decode { .. } => "decode_error",
            Self::WriteFailure { .. } => "write_failure",
            Self::RootUnavailable { .. } => "root_unavailable",
        }
    }
}
