//! Configuration for the input/output layer around the stripper.
//!
//! The stripping rules themselves take no options. What *is* configurable is
//! everything around them: how file bytes are decoded, which files are
//! accepted, how the downloadable result is named, and how many files a batch
//! processes at once. All of it lives in [`StripConfig`], built via
//! [`StripConfigBuilder`].

use crate::error::StripError;
use crate::progress::ProgressCallback;
use serde::Serialize;
use std::fmt;

/// Extensions accepted for file input unless `accept_any_extension` is set.
pub const DEFAULT_EXTENSIONS: &[&str] = &["md", "markdown", "txt"];

/// Configuration for a strip run.
///
/// # Example
/// ```rust
/// use mdstrip::StripConfig;
///
/// let config = StripConfig::builder()
///     .concurrency(8)
///     .output_suffix("_plain")
///     .build()
///     .unwrap();
/// assert_eq!(config.concurrency, 8);
/// ```
#[derive(Clone)]
pub struct StripConfig {
    /// Files processed at once by [`crate::strip_files`]. Default: 4.
    pub concurrency: usize,

    /// What to do with bytes that are not valid UTF-8. Default: [`DecodePolicy::Ignore`].
    pub decode_policy: DecodePolicy,

    /// Rewrite `\r\n` and lone `\r` to `\n` before stripping. Default: true.
    ///
    /// The line-anchored rules (headings, quotes, rules, list markers) match
    /// against `\n`-terminated lines; a stray `\r` before the newline would
    /// stop a horizontal rule from matching.
    pub normalise_line_endings: bool,

    /// Skip the `.md` / `.markdown` / `.txt` extension check. Default: false.
    pub accept_any_extension: bool,

    /// Appended to the source file name for the output file. Default: `"_cleaned"`.
    pub output_suffix: String,

    /// Extension of the output file. Default: `"txt"`.
    pub output_extension: String,

    /// Output file name when the text did not come from a file. Default: `"cleaned_text.txt"`.
    pub default_output_name: String,

    /// Optional per-file progress events for batch runs.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            concurrency: 4,
            decode_policy: DecodePolicy::default(),
            normalise_line_endings: true,
            accept_any_extension: false,
            output_suffix: "_cleaned".to_string(),
            output_extension: "txt".to_string(),
            default_output_name: "cleaned_text.txt".to_string(),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for StripConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StripConfig")
            .field("concurrency", &self.concurrency)
            .field("decode_policy", &self.decode_policy)
            .field("normalise_line_endings", &self.normalise_line_endings)
            .field("accept_any_extension", &self.accept_any_extension)
            .field("output_suffix", &self.output_suffix)
            .field("output_extension", &self.output_extension)
            .field("default_output_name", &self.default_output_name)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn StripProgressCallback>"),
            )
            .finish()
    }
}

impl StripConfig {
    /// Create a new builder for `StripConfig`.
    pub fn builder() -> StripConfigBuilder {
        StripConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`StripConfig`].
#[derive(Debug)]
pub struct StripConfigBuilder {
    config: StripConfig,
}

impl StripConfigBuilder {
    pub fn concurrency(mut self, n: usize) -> Self {
        self.config.concurrency = n.max(1);
        self
    }

    pub fn decode_policy(mut self, policy: DecodePolicy) -> Self {
        self.config.decode_policy = policy;
        self
    }

    pub fn normalise_line_endings(mut self, v: bool) -> Self {
        self.config.normalise_line_endings = v;
        self
    }

    pub fn accept_any_extension(mut self, v: bool) -> Self {
        self.config.accept_any_extension = v;
        self
    }

    pub fn output_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.output_suffix = suffix.into();
        self
    }

    /// Leading dots are dropped: `".txt"` and `"txt"` are equivalent.
    pub fn output_extension(mut self, ext: impl Into<String>) -> Self {
        let ext: String = ext.into();
        self.config.output_extension = ext.trim_start_matches('.').to_string();
        self
    }

    pub fn default_output_name(mut self, name: impl Into<String>) -> Self {
        self.config.default_output_name = name.into();
        self
    }

    /// Receive per-file events from batch runs.
    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<StripConfig, StripError> {
        let c = &self.config;
        if c.concurrency == 0 {
            return Err(StripError::InvalidConfig("Concurrency must be ≥ 1".into()));
        }
        if c.output_suffix.is_empty() {
            return Err(StripError::InvalidConfig(
                "Output suffix must not be empty (the output would overwrite its source)".into(),
            ));
        }
        if c.default_output_name.trim().is_empty() {
            return Err(StripError::InvalidConfig(
                "Default output name must not be empty".into(),
            ));
        }
        for field in [&c.output_suffix, &c.output_extension, &c.default_output_name] {
            if field.contains(['/', '\\']) {
                return Err(StripError::InvalidConfig(format!(
                    "Output naming must not contain path separators, got {field:?}"
                )));
            }
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// How undecodable bytes in file input are handled.
///
/// Decoding never fails either way; the choice is only whether the damage is
/// visible in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DecodePolicy {
    /// Drop invalid byte sequences silently. (default)
    #[default]
    Ignore,
    /// Substitute U+FFFD REPLACEMENT CHARACTER for each invalid sequence.
    Replace,
}
