//! # glyphscrub - strip invisible and confusable Unicode from source trees
//!
//! glyphscrub walks a directory tree and rewrites every text file it finds:
//!
//! - **Format characters** (Unicode category `Cf`, e.g. bidi controls) are removed
//! - **Zero-width characters** (ZWSP, ZWNJ, ZWJ, BOM, word joiner) are removed
//! - **Cyrillic homoglyphs** are replaced with the Latin letters they imitate
//! - **Line endings** can optionally be converted to CRLF or LF
//!
//! Hidden entries and paths matched by a directory's `.gitignore` are left
//! alone unless `--force` is given, and files with a NUL byte in their first
//! 4 KiB are treated as binary.
//!
//! ## Quick Start
//!
//! ```bash
//! # See what would be touched
//! glyphscrub --dry-run .
//!
//! # Clean in place, normalizing to LF and keeping modification times
//! glyphscrub --lf --preserve-timestamp .
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use glyphscrub::scan::{self, LineEnding, ScanOptions};
//!
//! let options = ScanOptions::new("docs/").line_ending(LineEnding::ToLf);
//! let result = scan::run(&options)?;
//! println!("cleaned {} files", result.stats.files_cleaned);
//!
//! assert_eq!(scan::transform("h\u{200B}ello", LineEnding::None), "hello");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod scan;

pub use cli::Cli;
pub use scan::{ScanOptions, ScrubError};
