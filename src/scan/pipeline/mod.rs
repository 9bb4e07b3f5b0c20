//! Pipeline modules for directory traversal and file processing

mod directory;
mod file;

pub use directory::{ScanObserver, Walker};
pub use file::FileProcessor;
