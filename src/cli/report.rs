//! Rendering of scrub reports in text and JSON form

use super::output::Output;
use crate::scan::{FileOutcome, FileReport, ScanObserver, ScanOptions, ScanResult};
use anyhow::Result;
use indicatif::ProgressBar;
use serde_json::json;
use std::path::Path;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum, serde::Serialize)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// One JSON document with every report and the statistics
    Json,
}

/// Streams reports to the console while the walk runs
pub struct ReportRenderer<'a> {
    output: &'a Output,
    format: OutputFormat,
    spinner: Option<ProgressBar>,
}

impl<'a> ReportRenderer<'a> {
    pub fn new(output: &'a Output, format: OutputFormat) -> Self {
        let spinner = (format == OutputFormat::Text
            && !output.is_verbose()
            && !output.is_quiet()
            && console::Term::stderr().is_term())
        .then(|| output.spinner("Scanning..."));

        Self {
            output,
            format,
            spinner,
        }
    }

    fn print(&self, report: &FileReport) {
        let path = report.path.display();
        match &report.outcome {
            FileOutcome::Cleaned => self.output.success(&format!("Cleaned {}", path)),
            FileOutcome::WouldChange => self.output.info(&format!("Would clean {}", path)),
            FileOutcome::Skipped(reason) => {
                self.output.warning(&format!("Skipped {}: {}", path, reason))
            }
            FileOutcome::Error(_) => {
                let detail = report.outcome.detail().unwrap_or_default();
                self.output.error(&detail);
            }
        }
    }

    /// Stop the spinner and print the closing summary or JSON document
    pub fn finish(self, options: &ScanOptions, result: &ScanResult) -> Result<()> {
        if let Some(spinner) = &self.spinner {
            spinner.finish_and_clear();
        }

        match self.format {
            OutputFormat::Text => {
                print_summary(self.output, options, result);
                Ok(())
            }
            OutputFormat::Json => print_json(options, result),
        }
    }
}

impl ScanObserver for ReportRenderer<'_> {
    fn directory_entered(&mut self, directory: &Path) {
        if let Some(spinner) = &self.spinner {
            spinner.set_message(directory.display().to_string());
        }
    }

    fn reported(&mut self, report: &FileReport) {
        if self.format != OutputFormat::Text {
            return;
        }
        match &self.spinner {
            Some(spinner) => spinner.suspend(|| self.print(report)),
            None => self.print(report),
        }
    }
}

fn print_summary(output: &Output, options: &ScanOptions, result: &ScanResult) {
    let stats = &result.stats;

    output.header(if options.dry_run { "Dry run summary" } else { "Summary" });
    output.summary_stats("Directories traversed", stats.directories_traversed);
    if stats.directories_skipped > 0 {
        output.summary_stats("Directories skipped", stats.directories_skipped);
    }
    if options.dry_run {
        output.summary_stats("Files that would change", stats.files_would_change);
    } else {
        output.summary_stats("Files cleaned", stats.files_cleaned);
    }
    output.summary_stats("Files skipped", stats.files_skipped);
    output.summary_stats("Files failed", stats.files_failed);
    output.verbose(&format!(
        "{} entries excluded by ignore or hidden rules",
        stats.entries_excluded
    ));
    output.verbose(&format!("{} binary files skipped", stats.binary_files_skipped));
    output.summary_stats("Elapsed", format!("{}ms", stats.scan_duration_ms));

    if result.has_errors() {
        output.warning(&format!("{} files could not be processed", stats.files_failed));
    }
}

fn print_json(options: &ScanOptions, result: &ScanResult) -> Result<()> {
    let document = json!({
        "options": options,
        "results": result.reports.iter().map(|r| json!({
            "path": r.path.to_string_lossy(),
            "outcome": r.outcome.label(),
            "detail": r.outcome.detail(),
        })).collect::<Vec<_>>(),
        "statistics": result.stats,
    });

    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}
