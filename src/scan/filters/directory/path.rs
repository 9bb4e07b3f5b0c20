//! Per-directory ignore patterns
//!
//! Each directory may carry a `.gitignore` whose non-comment lines are shell
//! globs. Rule sets are loaded once per directory and cached for the run.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Name of the per-directory ignore file
pub const IGNORE_FILE_NAME: &str = ".gitignore";

/// Pattern matching follows the host's default filesystem: case-insensitive
/// on Windows and macOS, case-sensitive everywhere else.
pub const CASE_INSENSITIVE: bool = cfg!(any(windows, target_os = "macos"));

/// Ignore patterns of a single directory
///
/// Patterns keep their file order. Each one is compiled on its own with
/// shell-glob semantics (`*`, `?`, `[...]`), where `*` may also match a path
/// separator, and the whole set is matched against a root-relative path.
#[derive(Debug, Clone)]
pub struct IgnoreRuleSet {
    patterns: Vec<String>,
    globs: GlobSet,
    /// Index into `patterns` for each compiled glob
    glob_sources: Vec<usize>,
}

impl IgnoreRuleSet {
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
            globs: GlobSet::empty(),
            glob_sources: Vec::new(),
        }
    }

    /// Compile patterns in order. Invalid globs are logged and left out.
    pub fn new(patterns: Vec<String>) -> Self {
        let mut builder = GlobSetBuilder::new();
        let mut glob_sources = Vec::with_capacity(patterns.len());

        for (index, pattern) in patterns.iter().enumerate() {
            let glob = GlobBuilder::new(pattern)
                .literal_separator(false)
                .case_insensitive(CASE_INSENSITIVE)
                .backslash_escape(!cfg!(windows))
                .build();
            match glob {
                Ok(glob) => {
                    builder.add(glob);
                    glob_sources.push(index);
                }
                Err(e) => tracing::warn!("Skipping invalid ignore pattern '{}': {}", pattern, e),
            }
        }

        let globs = builder.build().unwrap_or_else(|e| {
            tracing::warn!("Failed to build ignore pattern set: {}", e);
            glob_sources.clear();
            GlobSet::empty()
        });

        Self {
            patterns,
            globs,
            glob_sources,
        }
    }

    /// Parse the contents of an ignore file: trimmed lines, blanks and
    /// `#` comments dropped
    pub fn parse(contents: &str) -> Self {
        let patterns = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();
        Self::new(patterns)
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// First pattern, in load order, matching `relative`
    pub fn first_match(&self, relative: &Path) -> Option<&str> {
        if self.glob_sources.is_empty() {
            return None;
        }
        self.globs
            .matches(relative)
            .into_iter()
            .map(|i| self.glob_sources[i])
            .min()
            .map(|i| self.patterns[i].as_str())
    }

    pub fn is_excluded(&self, relative: &Path) -> bool {
        self.first_match(relative).is_some()
    }
}

/// Loads and caches the ignore rules of each directory for the lifetime of a run
#[derive(Debug, Default)]
pub struct IgnoreMatcher {
    cache: HashMap<PathBuf, Rc<IgnoreRuleSet>>,
}

impl IgnoreMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rules for `directory`, read from its ignore file on first use
    ///
    /// A missing file gives an empty rule set. Other read failures are
    /// logged and also give an empty set.
    pub fn load_patterns(&mut self, directory: &Path) -> Rc<IgnoreRuleSet> {
        if let Some(rules) = self.cache.get(directory) {
            return Rc::clone(rules);
        }

        let rules = Rc::new(read_rules(directory));
        if !rules.is_empty() {
            tracing::debug!(
                "Loaded {} ignore patterns from {}",
                rules.patterns().len(),
                directory.display()
            );
        }
        self.cache.insert(directory.to_path_buf(), Rc::clone(&rules));
        rules
    }

    pub fn cached_directories(&self) -> usize {
        self.cache.len()
    }
}

fn read_rules(directory: &Path) -> IgnoreRuleSet {
    let file = directory.join(IGNORE_FILE_NAME);
    match fs::read_to_string(&file) {
        Ok(contents) => IgnoreRuleSet::parse(&contents),
        Err(e) if e.kind() == io::ErrorKind::NotFound => IgnoreRuleSet::empty(),
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", file.display(), e);
            IgnoreRuleSet::empty()
        }
    }
}
