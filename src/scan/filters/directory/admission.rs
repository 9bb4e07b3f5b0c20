//! Admission policy for directory entries

use super::path::IgnoreRuleSet;
use crate::scan::filters::{Filter, FilterDecision};
use std::path::{Component, Path, PathBuf};

/// Decides whether a child entry of the current directory is visited
///
/// `force` admits everything. Otherwise vanished paths, hidden entries and
/// paths matching one of the directory's ignore patterns are skipped.
pub struct AdmissionFilter<'a> {
    root: &'a Path,
    rules: &'a IgnoreRuleSet,
    force: bool,
}

impl<'a> AdmissionFilter<'a> {
    pub fn new(root: &'a Path, rules: &'a IgnoreRuleSet, force: bool) -> Self {
        Self { root, rules, force }
    }

    pub fn should_process(&self, path: &Path) -> bool {
        self.filter(path) == FilterDecision::Process
    }
}

impl Filter for AdmissionFilter<'_> {
    type Input = Path;
    type Output = FilterDecision;

    fn filter(&self, path: &Path) -> FilterDecision {
        if self.force {
            return FilterDecision::Process;
        }

        if !path.exists() {
            return FilterDecision::Skip("path no longer exists");
        }

        if is_hidden(path) {
            return FilterDecision::Skip("hidden entry");
        }

        let relative = relative_to_root(self.root, path);
        if let Some(pattern) = self.rules.first_match(&relative) {
            tracing::trace!("{} matched ignore pattern '{}'", relative.display(), pattern);
            return FilterDecision::Skip("matched ignore pattern");
        }

        FilterDecision::Process
    }
}

/// `path` with the scan root removed and no leading separator
pub fn relative_to_root(root: &Path, path: &Path) -> PathBuf {
    let stripped = path.strip_prefix(root).unwrap_or(path);
    stripped
        .components()
        .skip_while(|c| matches!(c, Component::RootDir | Component::Prefix(_)))
        .collect()
}

/// Whether the host marks `path` as hidden
#[cfg(windows)]
pub fn is_hidden(path: &Path) -> bool {
    use std::os::windows::fs::MetadataExt;
    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;

    std::fs::symlink_metadata(path)
        .map(|meta| meta.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0)
        .unwrap_or(false)
}

/// Whether the host marks `path` as hidden
#[cfg(not(windows))]
pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.as_encoded_bytes().starts_with(b"."))
}
