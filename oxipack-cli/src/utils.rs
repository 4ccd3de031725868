//! Utility functions for the CLI.

use indicatif::{ProgressBar, ProgressStyle};
use oxipack::{CompressionReport, Method, OxiPackError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Inputs at least this large get a spinner while the codec runs.
const SPINNER_THRESHOLD: usize = 1024 * 1024;

/// Read the file to compress.
///
/// A missing, unreadable or empty file is reported as
/// [`OxiPackError::IoUnavailable`].
pub fn read_input(path: &Path) -> Result<Vec<u8>, OxiPackError> {
    let data = fs::read(path)
        .map_err(|e| OxiPackError::io_unavailable(path.display().to_string(), e.to_string()))?;
    if data.is_empty() {
        return Err(OxiPackError::io_unavailable(
            path.display().to_string(),
            "file is empty",
        ));
    }
    Ok(data)
}

/// Create a spinner for long codec runs.
pub fn create_spinner(input_len: usize, enable: bool) -> ProgressBar {
    if !enable || input_len < SPINNER_THRESHOLD {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} [{elapsed}] {msg}")
    {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Build a report from the sizes of the input and compressed files on disk.
pub fn report_from_files(
    input: &Path,
    compressed: &Path,
) -> Result<CompressionReport, Box<dyn std::error::Error>> {
    let original_size = fs::metadata(input)?.len();
    let compressed_size = fs::metadata(compressed)?.len();
    Ok(CompressionReport::new(original_size, compressed_size)?)
}

/// JSON form of a compression report.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ReportJson {
    pub input: String,
    pub method: String,
    pub compressed_file: String,
    pub decompressed_file: String,
    pub original_size: u64,
    pub compressed_size: u64,
    pub ratio: f64,
    pub percent_of_original: f64,
    pub reduction_percent: f64,
    pub reconstruction_matches: bool,
}

impl ReportJson {
    pub fn new(
        input: &Path,
        method: Method,
        compressed: &Path,
        decompressed: &Path,
        report: &CompressionReport,
        reconstruction_matches: bool,
    ) -> Self {
        Self {
            input: input.display().to_string(),
            method: method.tag().to_string(),
            compressed_file: compressed.display().to_string(),
            decompressed_file: decompressed.display().to_string(),
            original_size: report.original_size(),
            compressed_size: report.compressed_size(),
            ratio: report.ratio(),
            percent_of_original: report.percent_of_original(),
            reduction_percent: report.reduction_percent(),
            reconstruction_matches,
        }
    }
}

/// Print a report in human-readable form.
pub fn print_report(method: Method, report: &CompressionReport) {
    println!();
    println!("Method:              {}", method);
    println!("Original size:       {} bytes", report.original_size());
    println!("Compressed size:     {} bytes", report.compressed_size());
    println!("Percent of original: {:.2}%", report.percent_of_original());
    println!("Compression:         {:.2}% reduction", report.reduction_percent());
    println!();
}
