//! Error types for the mdstrip library.
//!
//! The stripping transformation itself ([`crate::strip`]) is total and has no
//! error type. Everything that can fail lives in the layer around it: reading
//! input, validating that there *is* input, and writing the result.
//!
//! * [`StripError`] — **Fatal** for the call that returned it (missing file,
//!   blank input, unwritable output).
//!
//! * [`FileError`] — **Non-fatal**: one file of a batch failed but the others
//!   were processed. Stored inside [`crate::output::FileResult`].

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the mdstrip library.
#[derive(Debug, Error)]
pub enum StripError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Input file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The path exists but is a directory or other non-regular file.
    #[error("'{path}' is not a regular file")]
    NotAFile { path: PathBuf },

    /// The file extension is not one of the accepted Markdown/text types.
    #[error("Unsupported file type '{path}': expected one of {accepted}\nUse --any-extension to skip this check.")]
    UnsupportedExtension { path: PathBuf, accepted: String },

    /// Reading the file failed after it was opened.
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Nothing to process: the text was empty or whitespace-only.
    ///
    /// This is a user-input condition, not a crash; front-ends should report
    /// it as a warning.
    #[error("Please enter some text or upload a file first.")]
    NoInput,

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StripError {
    /// `true` for conditions a front-end should show as a warning rather than
    /// an error.
    pub fn is_warning(&self) -> bool {
        matches!(self, StripError::NoInput)
    }
}

/// A non-fatal error for a single file in a batch.
#[derive(Debug, Clone, Error, serde::Serialize)]
pub enum FileError {
    /// The file could not be read or was rejected before stripping.
    #[error("{path}: {detail}")]
    ReadFailed { path: PathBuf, detail: String },

    /// The file had no content to strip.
    #[error("{path}: file is empty")]
    Empty { path: PathBuf },

    /// The cleaned text could not be written.
    #[error("{path}: write failed: {detail}")]
    WriteFailed { path: PathBuf, detail: String },

    /// An earlier input in the same batch already writes to this output path.
    #[error("{path}: output '{output}' is already taken by '{first}'")]
    DuplicateOutput {
        path: PathBuf,
        output: PathBuf,
        first: PathBuf,
    },
}

impl FileError {
    /// Classify a fatal single-file error as a batch entry failure.
    pub fn from_strip_error(path: PathBuf, err: &StripError) -> Self {
        match err {
            StripError::NoInput => FileError::Empty { path },
            StripError::OutputWriteFailed { source, .. } => FileError::WriteFailed {
                path,
                detail: source.to_string(),
            },
            other => FileError::ReadFailed {
                path,
                detail: other.to_string(),
            },
        }
    }
}
