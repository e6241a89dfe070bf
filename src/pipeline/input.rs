//! Input resolution: turn a path or raw bytes into text the stripper can use.
//!
//! Uploaded Markdown is not always clean UTF-8 (a Latin-1 byte pasted into a
//! README, a truncated multi-byte sequence at the end of a copy). Decoding
//! never fails here: bad sequences are dropped or replaced according to
//! [`DecodePolicy`], so a single stray byte never costs the user the file.

use crate::config::{DecodePolicy, StripConfig, DEFAULT_EXTENSIONS};
use crate::error::StripError;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Text read from a file, with the name it was uploaded under.
#[derive(Debug, Clone)]
pub struct Document {
    pub name: Option<String>,
    pub text: String,
}

/// `true` when there is nothing to strip: empty or whitespace-only text.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Decode file bytes as UTF-8 without failing.
pub fn decode_bytes(bytes: &[u8], policy: DecodePolicy) -> String {
    match policy {
        DecodePolicy::Replace => String::from_utf8_lossy(bytes).into_owned(),
        DecodePolicy::Ignore => {
            let mut out = String::with_capacity(bytes.len());
            for chunk in bytes.utf8_chunks() {
                out.push_str(chunk.valid());
            }
            out
        }
    }
}

/// Rewrite CRLF and lone CR line endings to LF.
pub fn normalise_line_endings(input: &str) -> Cow<'_, str> {
    if input.contains('\r') {
        Cow::Owned(input.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(input)
    }
}

/// Check the file extension against the accepted Markdown/text types.
pub fn has_accepted_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            DEFAULT_EXTENSIONS
                .iter()
                .any(|accepted| e.eq_ignore_ascii_case(accepted))
        })
        .unwrap_or(false)
}

/// The file name shown to the user and used to derive the output name.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Validate a local input path: it must exist, be a readable regular file and,
/// unless the config says otherwise, carry an accepted extension.
pub fn resolve_local(path: &Path, config: &StripConfig) -> Result<PathBuf, StripError> {
    let path = path.to_path_buf();

    let meta = match std::fs::metadata(&path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(StripError::PermissionDenied { path });
        }
        Err(_) => return Err(StripError::FileNotFound { path }),
    };

    if !meta.is_file() {
        return Err(StripError::NotAFile { path });
    }

    if !config.accept_any_extension && !has_accepted_extension(&path) {
        return Err(StripError::UnsupportedExtension {
            path,
            accepted: DEFAULT_EXTENSIONS.join(", "),
        });
    }

    // Check read permission by attempting to open
    if let Err(e) = std::fs::File::open(&path) {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            return Err(StripError::PermissionDenied { path });
        }
        return Err(StripError::ReadFailed { path, source: e });
    }

    debug!("Resolved input file: {}", path.display());
    Ok(path)
}

/// Read and decode a file into a [`Document`].
pub async fn read_document(path: &Path, config: &StripConfig) -> Result<Document, StripError> {
    let path = resolve_local(path, config)?;
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| StripError::ReadFailed {
            path: path.clone(),
            source: e,
        })?;

    let text = decode_bytes(&bytes, config.decode_policy);
    if text.len() != bytes.len() && config.decode_policy == DecodePolicy::Ignore {
        debug!(
            "Dropped {} undecodable bytes from {}",
            bytes.len() - text.len(),
            path.display()
        );
    }

    Ok(Document {
        name: Some(display_name(&path)),
        text,
    })
}
