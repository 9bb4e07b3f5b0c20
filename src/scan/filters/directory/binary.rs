//! Binary file filtering
//!
//! A heuristic, not an encoding detector: a file is text unless one of its
//! leading bytes is NUL. Byte order marks are not inspected, so UTF-16
//! content (which is full of NUL bytes for ASCII text) counts as binary.

use crate::scan::filters::{Filter, FilterDecision};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Number of leading bytes inspected
pub const INSPECT_BYTES: usize = 4096;

#[derive(Debug, Clone, Copy, Default)]
pub struct TextClassifier;

impl TextClassifier {
    pub fn new() -> Self {
        Self
    }

    /// True if the file can be read and has no NUL in its leading bytes.
    /// Unreadable files are reported as not text.
    pub fn is_text_file(&self, path: &Path) -> bool {
        match read_head(path) {
            Ok(head) => !head.contains(&0),
            Err(e) => {
                tracing::debug!("Cannot classify {}: {}", path.display(), e);
                false
            }
        }
    }
}

fn read_head(path: &Path) -> io::Result<Vec<u8>> {
    let mut head = Vec::with_capacity(INSPECT_BYTES);
    File::open(path)?
        .take(INSPECT_BYTES as u64)
        .read_to_end(&mut head)?;
    Ok(head)
}

impl Filter for TextClassifier {
    type Input = Path;
    type Output = FilterDecision;

    fn filter(&self, path: &Path) -> FilterDecision {
        if self.is_text_file(path) {
            FilterDecision::Process
        } else {
            FilterDecision::Skip("binary or unreadable file")
        }
    }
}
