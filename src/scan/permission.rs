//! Write-permission probing with a per-run verdict cache

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// Answers "can this path be written?" without changing it
///
/// The first verdict for a path is kept for the rest of the run. Every
/// failure during a probe counts as "not writable".
#[derive(Debug, Default)]
pub struct PermissionProbe {
    verdicts: HashMap<PathBuf, bool>,
}

impl PermissionProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_write(&mut self, path: &Path) -> bool {
        if let Some(&verdict) = self.verdicts.get(path) {
            return verdict;
        }

        let result = if path.is_dir() {
            probe_directory(path)
        } else {
            probe_file(path)
        };
        let verdict = match result {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!("No write access to {}: {}", path.display(), e);
                false
            }
        };

        self.verdicts.insert(path.to_path_buf(), verdict);
        verdict
    }

    pub fn cached_verdicts(&self) -> usize {
        self.verdicts.len()
    }
}

/// Create and immediately remove a uniquely named file inside `dir`
fn probe_directory(dir: &Path) -> io::Result<()> {
    let probe = dir.join(format!(".glyphscrub-probe-{}", uuid::Uuid::new_v4()));
    OpenOptions::new().write(true).create_new(true).open(&probe)?;
    fs::remove_file(&probe)
}

/// Open for read-write without truncating; the handle is dropped right away
fn probe_file(path: &Path) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.read(true).write(true);

    #[cfg(windows)]
    {
        use std::os::windows::fs::OpenOptionsExt;
        options.share_mode(0);
    }

    options.open(path).map(drop)
}
