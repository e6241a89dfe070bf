//! Result types returned by the strip entry points.

use crate::error::FileError;
use serde::Serialize;
use std::path::PathBuf;

/// The cleaned text plus what a front-end needs to display and save it.
#[derive(Debug, Clone, Serialize)]
pub struct StripOutput {
    /// The plain text produced by [`crate::strip`].
    pub text: String,
    /// File name of the source, `None` for pasted/stdin text.
    pub source_name: Option<String>,
    /// Suggested file name for saving `text`.
    pub download_name: String,
    pub stats: StripStats,
}

/// Size and timing figures for one strip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StripStats {
    pub input_bytes: usize,
    pub output_bytes: usize,
    pub input_lines: usize,
    pub output_lines: usize,
    pub duration_ms: u64,
}

impl StripStats {
    /// Fraction of the input removed, in `0.0..=1.0`.
    pub fn reduction(&self) -> f64 {
        if self.input_bytes == 0 {
            return 0.0;
        }
        1.0 - (self.output_bytes as f64 / self.input_bytes as f64)
    }
}

/// Outcome for one file of a batch.
#[derive(Debug, Clone, Serialize)]
pub struct FileResult {
    pub input: PathBuf,
    /// Where the cleaned text was written, when it succeeded.
    pub output: Option<PathBuf>,
    pub stats: Option<StripStats>,
    pub error: Option<FileError>,
}

impl FileResult {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Everything [`crate::strip_files`] did, in input order.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutput {
    pub files: Vec<FileResult>,
    pub succeeded: usize,
    pub failed: usize,
    pub duration_ms: u64,
}
