//! Scan configuration

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Line-ending conversion applied as the last rewrite step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineEnding {
    #[default]
    None,
    /// Lone `\n` becomes `\r\n`
    ToCrlf,
    /// `\r\n` becomes `\n`
    ToLf,
}

impl LineEnding {
    /// Build the mode from the two CLI switches. CRLF wins when both are set.
    pub fn from_flags(crlf: bool, lf: bool) -> Self {
        if crlf {
            Self::ToCrlf
        } else if lf {
            Self::ToLf
        } else {
            Self::None
        }
    }
}

/// Options for one scrub run, built once before traversal and read-only after
#[derive(Debug, Clone, Serialize)]
pub struct ScanOptions {
    pub root: PathBuf,
    pub dry_run: bool,
    /// Bypass hidden-entry and ignore-pattern rules
    pub force: bool,
    pub line_ending: LineEnding,
    pub preserve_timestamp: bool,
}

impl ScanOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            dry_run: false,
            force: false,
            line_ending: LineEnding::None,
            preserve_timestamp: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    pub fn preserve_timestamp(mut self, preserve: bool) -> Self {
        self.preserve_timestamp = preserve;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
