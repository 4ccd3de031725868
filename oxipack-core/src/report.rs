//! Compression ratio reporting.

use crate::error::{OxiPackError, Result};

/// Sizes of an original input and its compressed artifact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionReport {
    original_size: u64,
    compressed_size: u64,
}

impl CompressionReport {
    /// Create a report. Both sizes must be positive.
    pub fn new(original_size: u64, compressed_size: u64) -> Result<Self> {
        if original_size == 0 || compressed_size == 0 {
            return Err(OxiPackError::invalid_sizes(original_size, compressed_size));
        }
        Ok(Self {
            original_size,
            compressed_size,
        })
    }

    /// Original size in bytes.
    pub fn original_size(&self) -> u64 {
        self.original_size
    }

    /// Compressed artifact size in bytes.
    pub fn compressed_size(&self) -> u64 {
        self.compressed_size
    }

    /// `compressed / original`.
    pub fn ratio(&self) -> f64 {
        self.compressed_size as f64 / self.original_size as f64
    }

    /// Compressed size as a percentage of the original.
    pub fn percent_of_original(&self) -> f64 {
        self.ratio() * 100.0
    }

    /// Size reduction in percent. Negative when the artifact grew.
    pub fn reduction_percent(&self) -> f64 {
        100.0 - self.percent_of_original()
    }
}
