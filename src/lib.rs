//! # mdstrip
//!
//! Strip Markdown syntax from text, keeping the readable content.
//!
//! ## Why this crate?
//!
//! Markdown is everywhere text is written for people, and a nuisance wherever
//! text is consumed by something else: SMS bodies, search indexes, speech
//! synthesis, spreadsheets. Rendering to HTML and scraping it back is heavy;
//! this crate instead runs a fixed table of regex rewrites that removes the
//! markers and leaves the words, including table cells and link labels.
//!
//! ## Pipeline Overview
//!
//! ```text
//! text / file
//!  │
//!  ├─ 1. Input   read file, decode UTF-8 leniently, reject blank input
//!  ├─ 2. Strip   15 ordered rewrites (fences … whitespace, trim)
//!  └─ 3. Output  cleaned text + `<name>_cleaned.txt` download name
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! // The core transformation: total, pure, no configuration.
//! assert_eq!(mdstrip::strip("**bold** and [a link](https://x.y)"), "bold and a link");
//!
//! // With input checks and output naming.
//! let config = mdstrip::StripConfig::default();
//! let out = mdstrip::strip_text("| A | B |\n|---|---|\n| 1 | 2 |", &config).unwrap();
//! assert_eq!(out.download_name, "cleaned_text.txt");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `mdstrip` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! mdstrip = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{DecodePolicy, StripConfig, StripConfigBuilder};
pub use convert::{strip_file, strip_file_sync, strip_files, strip_text, strip_to_file};
pub use error::{FileError, StripError};
pub use output::{BatchOutput, FileResult, StripOutput, StripStats};
pub use pipeline::strip::{rules, strip, Replacement, Rule};
pub use progress::{NoopProgressCallback, ProgressCallback, StripProgressCallback};
