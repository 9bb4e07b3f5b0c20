//! Directory-level filters - applied before any file content is rewritten
//!
//! ## Filter Order
//!
//! 1. **Admission** - force override, existence, hidden entries, ignore patterns
//! 2. **Text classification** - NUL-byte heuristic over the leading bytes
//!
//! Ignore patterns come from the [`IgnoreMatcher`], which loads the
//! `.gitignore` of each directory once and keeps it for the whole run.

pub mod admission;
pub mod binary;
pub mod path;

pub use admission::{AdmissionFilter, is_hidden};
pub use binary::TextClassifier;
pub use path::{IgnoreMatcher, IgnoreRuleSet};
