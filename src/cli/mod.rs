//! Command-line interface for glyphscrub
//!
//! Every flag can also be set through a `GLYPHSCRUB_*` environment variable.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod output;
mod report;

pub use output::Output;
pub use report::{OutputFormat, ReportRenderer};

use crate::scan::{LineEnding, ScanOptions, Walker};

#[derive(Parser)]
#[command(
    name = "glyphscrub",
    version = env!("CARGO_PKG_VERSION"),
    about = "Strip invisible and confusable Unicode from text files",
    long_about = "glyphscrub walks a directory tree, skips ignored, hidden and binary files, \
                  and removes format characters, zero-width characters and Cyrillic homoglyphs \
                  from every text file it finds."
)]
pub struct Cli {
    /// Directory to scrub
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Report what would be cleaned without writing anything
    #[arg(long, env = "GLYPHSCRUB_DRY_RUN")]
    pub dry_run: bool,

    /// Also process hidden entries and paths matched by .gitignore
    #[arg(short, long, env = "GLYPHSCRUB_FORCE")]
    pub force: bool,

    /// Convert line endings to CRLF (wins over --lf)
    #[arg(long, env = "GLYPHSCRUB_CRLF")]
    pub crlf: bool,

    /// Convert line endings to LF
    #[arg(long, env = "GLYPHSCRUB_LF")]
    pub lf: bool,

    /// Restore each file's original modification time after writing
    #[arg(long, env = "GLYPHSCRUB_PRESERVE_TIMESTAMP")]
    pub preserve_timestamp: bool,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text", env = "GLYPHSCRUB_FORMAT")]
    pub format: OutputFormat,
}

impl Cli {
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions::new(&self.path)
            .dry_run(self.dry_run)
            .force(self.force)
            .line_ending(LineEnding::from_flags(self.crlf, self.lf))
            .preserve_timestamp(self.preserve_timestamp)
    }

    /// Execute the scrub. Only an unavailable root is returned as an error.
    pub fn run(self) -> Result<()> {
        setup_logging(self.verbose, self.quiet);

        let options = self.scan_options();
        tracing::debug!("Scan options: {:?}", options);

        let output = Output::new(self.verbose > 0, self.quiet);
        let mut renderer = ReportRenderer::new(&output, self.format);
        let result = Walker::new(&options).run_with(&mut renderer)?;

        renderer.finish(&options, &result)
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info,globset=warn"),
            2 => tracing_subscriber::EnvFilter::new("debug,globset=warn"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
