//! Entry points: strip pasted text, a file, or a batch of files.
//!
//! These wrap [`crate::strip`] with the input checks and output naming a
//! front-end needs. The stripper itself never fails; every error returned here
//! comes from reading, validating, or writing.

use crate::config::StripConfig;
use crate::error::{FileError, StripError};
use crate::output::{BatchOutput, FileResult, StripOutput, StripStats};
use crate::pipeline::{download, input, strip};
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Strip Markdown from text entered directly (pasted, piped, `--text`).
///
/// # Errors
/// [`StripError::NoInput`] when `text` is empty or whitespace-only. The
/// stripper is not run in that case.
pub fn strip_text(text: &str, config: &StripConfig) -> Result<StripOutput, StripError> {
    strip_document(
        input::Document {
            name: None,
            text: text.to_string(),
        },
        config,
    )
}

/// Read a Markdown/text file and strip it.
///
/// # Errors
/// File-level failures (missing, unreadable, wrong extension) and
/// [`StripError::NoInput`] for an empty file.
pub async fn strip_file(
    path: impl AsRef<Path>,
    config: &StripConfig,
) -> Result<StripOutput, StripError> {
    let doc = input::read_document(path.as_ref(), config).await?;
    strip_document(doc, config)
}

/// Synchronous wrapper around [`strip_file`].
///
/// Creates a temporary tokio runtime internally.
pub fn strip_file_sync(
    path: impl AsRef<Path>,
    config: &StripConfig,
) -> Result<StripOutput, StripError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| StripError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(strip_file(path, config))
}

/// Strip a file and write the result to `output_path`.
///
/// Uses atomic write (temp file + rename) to prevent partial files.
pub async fn strip_to_file(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &StripConfig,
) -> Result<StripStats, StripError> {
    let output = strip_file(input_path, config).await?;
    download::write_atomic(output_path.as_ref(), &output.text).await?;
    Ok(output.stats)
}

/// Strip many files, writing each to `output_dir/<download name>`.
///
/// Files are processed with bounded concurrency (`config.concurrency`). A
/// failing file does not stop the batch; it is recorded as a [`FileError`] in
/// its [`FileResult`]. Results are returned in input order.
///
/// Inputs that share a file name map to the same output path. The first one
/// keeps it; later ones fail with [`FileError::DuplicateOutput`] and are not
/// read.
pub async fn strip_files(
    paths: &[PathBuf],
    output_dir: impl AsRef<Path>,
    config: &StripConfig,
) -> BatchOutput {
    let start = Instant::now();
    let output_dir = output_dir.as_ref();
    let total = paths.len();
    info!(
        "Stripping {} files into {} (concurrency {})",
        total,
        output_dir.display(),
        config.concurrency
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_start(total);
    }

    let targets = plan_outputs(paths, output_dir, config);
    let mut files: Vec<(usize, FileResult)> = stream::iter(paths.iter().zip(targets).enumerate())
        .map(|(idx, (path, target))| async move {
            (idx, process_one(idx, total, path, target, config).await)
        })
        .buffer_unordered(config.concurrency.max(1))
        .collect()
        .await;
    files.sort_by_key(|(idx, _)| *idx);
    let files: Vec<FileResult> = files.into_iter().map(|(_, r)| r).collect();

    let succeeded = files.iter().filter(|f| f.is_ok()).count();
    let failed = total - succeeded;

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_complete(total, succeeded);
    }

    let duration_ms = start.elapsed().as_millis() as u64;
    info!(
        "Batch complete: {}/{} files, {}ms total",
        succeeded, total, duration_ms
    );

    BatchOutput {
        files,
        succeeded,
        failed,
        duration_ms,
    }
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Run the stripper over an already-decoded document.
fn strip_document(doc: input::Document, config: &StripConfig) -> Result<StripOutput, StripError> {
    if input::is_blank(&doc.text) {
        return Err(StripError::NoInput);
    }

    let start = Instant::now();
    let source = if config.normalise_line_endings {
        input::normalise_line_endings(&doc.text)
    } else {
        std::borrow::Cow::Borrowed(doc.text.as_str())
    };

    let text = strip::strip(&source);
    let stats = StripStats {
        input_bytes: doc.text.len(),
        output_bytes: text.len(),
        input_lines: doc.text.lines().count(),
        output_lines: text.lines().count(),
        duration_ms: start.elapsed().as_millis() as u64,
    };
    debug!(
        "Stripped {}: {} → {} bytes",
        doc.name.as_deref().unwrap_or("<text>"),
        stats.input_bytes,
        stats.output_bytes
    );

    let download_name = download::download_name(doc.name.as_deref(), config);
    Ok(StripOutput {
        text,
        source_name: doc.name,
        download_name,
        stats,
    })
}

/// Output path for each batch input, or the error for an input whose path an
/// earlier input already claimed.
fn plan_outputs(
    paths: &[PathBuf],
    output_dir: &Path,
    config: &StripConfig,
) -> Vec<Result<PathBuf, FileError>> {
    let mut claimed: HashMap<PathBuf, &Path> = HashMap::with_capacity(paths.len());
    paths
        .iter()
        .map(|path| {
            let name = download::download_name(Some(&input::display_name(path)), config);
            let target = output_dir.join(name);
            match claimed.get(&target) {
                Some(first) => Err(FileError::DuplicateOutput {
                    path: path.clone(),
                    output: target,
                    first: first.to_path_buf(),
                }),
                None => {
                    claimed.insert(target.clone(), path.as_path());
                    Ok(target)
                }
            }
        })
        .collect()
}

/// Strip and write one file of a batch, reporting progress.
async fn process_one(
    idx: usize,
    total: usize,
    path: &Path,
    target: Result<PathBuf, FileError>,
    config: &StripConfig,
) -> FileResult {
    let name = input::display_name(path);
    if let Some(ref cb) = config.progress_callback {
        cb.on_file_start(idx + 1, total, &name);
    }

    let result = match target {
        Ok(out_path) => {
            let written = strip_to_file(path, &out_path, config).await;
            written
                .map(|stats| (out_path, stats))
                .map_err(|e| FileError::from_strip_error(path.to_path_buf(), &e))
        }
        Err(e) => Err(e),
    };

    match result {
        Ok((out_path, stats)) => {
            if let Some(ref cb) = config.progress_callback {
                cb.on_file_complete(idx + 1, total, &name, stats.output_bytes);
            }
            FileResult {
                input: path.to_path_buf(),
                output: Some(out_path),
                stats: Some(stats),
                error: None,
            }
        }
        Err(e) => {
            warn!("Failed to strip {}", e);
            if let Some(ref cb) = config.progress_callback {
                cb.on_file_error(idx + 1, total, &name, &e.to_string());
            }
            FileResult {
                input: path.to_path_buf(),
                output: None,
                stats: None,
                error: Some(e),
            }
        }
    }
}
