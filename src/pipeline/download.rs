//! Output naming and writing.
//!
//! The cleaned text is offered back as a file named after its source: an
//! upload called `notes.md` becomes `notes.md_cleaned.txt`. The full source
//! name is kept, extension included, so `notes.md` and `notes.txt` never
//! collide in the same output directory. Pasted text has no name and gets a
//! fixed default.

use crate::config::StripConfig;
use crate::error::StripError;
use std::path::Path;
use tracing::debug;

/// File name to save the cleaned text under.
pub fn download_name(source_name: Option<&str>, config: &StripConfig) -> String {
    match source_name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) if config.output_extension.is_empty() => {
            format!("{name}{}", config.output_suffix)
        }
        Some(name) => format!(
            "{name}{}.{}",
            config.output_suffix, config.output_extension
        ),
        None => config.default_output_name.clone(),
    }
}

/// Write `contents` to `path` atomically (temp file + rename), creating
/// parent directories as needed.
pub async fn write_atomic(path: &Path, contents: &str) -> Result<(), StripError> {
    let io_err = |e: std::io::Error| StripError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
    }

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    tokio::fs::write(&tmp_path, contents).await.map_err(io_err)?;
    if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(io_err(e));
    }

    debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}
