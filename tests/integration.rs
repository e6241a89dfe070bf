//! Integration tests for mdstrip.
//!
//! These exercise the public API end to end on real files in a temporary
//! directory: reading and decoding, stripping, naming and writing output, and
//! batch runs with partial failures.

use mdstrip::{
    strip, strip_file, strip_file_sync, strip_files, strip_text, strip_to_file, DecodePolicy,
    FileError, StripConfig, StripError, StripProgressCallback,
};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// ── Test helpers ─────────────────────────────────────────────────────────────

const SAMPLE: &str = "\
# Release Notes

> **Heads up:** this release changes the `config` format.

## Changes

- Faster *startup*
- New [docs site](https://docs.example.org)
- ![screenshot](shot.png)

| Option | Default |
|--------|---------|
| debug  | false   |

1. Back up your config
2. Upgrade

---

```toml
[server]
port = 8080
```

Thanks!
";

fn write(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Assert the text carries none of the marker classes the stripper removes.
fn assert_no_markdown(text: &str) {
    for marker in ["```", "**", "](", "![", "|", "# ", "> "] {
        assert!(
            !text.contains(marker),
            "output still contains {marker:?}:\n{text}"
        );
    }
    assert!(!text.contains("\n\n"), "blank lines not collapsed:\n{text}");
    assert_eq!(text, text.trim(), "output not trimmed");
}

// ── Core transformation ──────────────────────────────────────────────────────

#[test]
fn test_sample_document() {
    let out = strip(SAMPLE);
    assert_no_markdown(&out);

    let lines: Vec<&str> = out.lines().map(str::trim_end).collect();
    assert_eq!(
        lines,
        vec![
            "Release Notes",
            "Heads up: this release changes the config format.",
            "Changes",
            "Faster startup",
            "New docs site",
            "Option Default",
            "debug false",
            "Back up your config",
            "Upgrade",
            "Thanks!",
        ]
    );
}

#[test]
fn test_documented_examples() {
    assert_eq!(strip(""), "");
    assert_eq!(strip("**bold**"), "bold");
    assert_eq!(strip("# Heading\ntext"), "Heading\ntext");
    assert_eq!(strip("[label](http://x)"), "label");
    assert_eq!(strip("![alt](http://x)"), "");
    assert_eq!(strip("`code`"), "code");
    assert_eq!(strip("```\nblock\n```"), "");
}

#[test]
fn test_table_cells_on_separate_lines() {
    let out = strip("| A | B |\n|---|---|\n| 1 | 2 |");
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("A B"));
    assert!(lines[1].contains("1 2"));
    assert!(!out.contains('|') && !out.contains('-'));
}

#[test]
fn test_plain_text_only_whitespace_normalised() {
    let input = "  First line   with  gaps\n\n\n\nSecond\tline\t\tend  \n";
    assert_eq!(strip(input), "First line with gaps\nSecond\tline end");
}

#[test]
fn test_stripping_cleaned_text_again_is_stable() {
    let once = strip(SAMPLE);
    assert_eq!(strip(&once), once);
}

// ── Text entry ───────────────────────────────────────────────────────────────

#[test]
fn test_strip_text_warns_on_blank() {
    let err = strip_text("\n\t  \n", &StripConfig::default()).unwrap_err();
    assert!(matches!(err, StripError::NoInput));
    assert!(err.is_warning());
}

// ── File input ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_strip_file_names_download_after_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "notes.md", SAMPLE.as_bytes());

    let out = strip_file(&path, &StripConfig::default()).await.unwrap();

    assert_eq!(out.source_name.as_deref(), Some("notes.md"));
    assert_eq!(out.download_name, "notes.md_cleaned.txt");
    assert_eq!(out.text, strip(SAMPLE));
    assert_eq!(out.stats.input_bytes, SAMPLE.len());
    assert!(out.stats.output_bytes < out.stats.input_bytes);
}

#[tokio::test]
async fn test_strip_file_drops_invalid_utf8() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "latin.txt", b"**caf\xE9** ok");

    let out = strip_file(&path, &StripConfig::default()).await.unwrap();
    assert_eq!(out.text, "caf ok");

    let replace = StripConfig::builder()
        .decode_policy(DecodePolicy::Replace)
        .build()
        .unwrap();
    let out = strip_file(&path, &replace).await.unwrap();
    assert_eq!(out.text, "caf\u{FFFD} ok");
}

#[tokio::test]
async fn test_strip_file_crlf() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "win.md", b"# Title\r\n\r\n***\r\n- item\r\n");

    let out = strip_file(&path, &StripConfig::default()).await.unwrap();
    // `***` loses one pair to emphasis; the lone `*` left is an empty item.
    assert_eq!(out.text, "Title\nitem");
}

#[tokio::test]
async fn test_strip_file_errors() {
    let dir = tempfile::tempdir().unwrap();
    let config = StripConfig::default();

    let missing = strip_file(dir.path().join("nope.md"), &config).await;
    assert!(matches!(missing, Err(StripError::FileNotFound { .. })));

    let png = write(dir.path(), "image.png", b"\x89PNG");
    let wrong = strip_file(&png, &config).await;
    assert!(matches!(wrong, Err(StripError::UnsupportedExtension { .. })));

    let empty = write(dir.path(), "empty.md", b"   \n");
    let blank = strip_file(&empty, &config).await;
    assert!(matches!(blank, Err(StripError::NoInput)));
}

#[test]
fn test_strip_file_sync() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "sync.markdown", b"## Sync *works*");

    let out = strip_file_sync(&path, &StripConfig::default()).unwrap();
    assert_eq!(out.text, "Sync works");
    assert_eq!(out.download_name, "sync.markdown_cleaned.txt");
}

// ── File output ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_strip_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "in.md", b"# Hi\n\n**there**\n");
    let output = dir.path().join("out/plain.txt");

    let stats = strip_to_file(&input, &output, &StripConfig::default())
        .await
        .unwrap();

    assert_eq!(std::fs::read_to_string(&output).unwrap(), "Hi\nthere");
    assert_eq!(stats.output_bytes, "Hi\nthere".len());
}

// ── Batch ────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Counter {
    started: AtomicUsize,
    completed: AtomicUsize,
    failed: AtomicUsize,
    batch_ok: AtomicUsize,
}

impl StripProgressCallback for Counter {
    fn on_file_start(&self, _index: usize, _total: usize, _name: &str) {
        self.started.fetch_add(1, Ordering::SeqCst);
    }

    fn on_file_complete(&self, _index: usize, _total: usize, _name: &str, _len: usize) {
        self.completed.fetch_add(1, Ordering::SeqCst);
    }

    fn on_file_error(&self, _index: usize, _total: usize, _name: &str, _error: &str) {
        self.failed.fetch_add(1, Ordering::SeqCst);
    }

    fn on_batch_complete(&self, _total_files: usize, success_count: usize) {
        self.batch_ok.store(success_count, Ordering::SeqCst);
    }
}

#[tokio::test]
async fn test_strip_files_partial_failure() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();

    let paths = vec![
        write(src.path(), "a.md", b"# A\n*alpha*"),
        src.path().join("missing.md"),
        write(src.path(), "b.txt", b"- beta"),
        write(src.path(), "blank.md", b""),
    ];

    let counter = Arc::new(Counter::default());
    let config = StripConfig::builder()
        .concurrency(2)
        .progress_callback(counter.clone())
        .build()
        .unwrap();

    let report = strip_files(&paths, out.path(), &config).await;

    assert_eq!(report.files.len(), 4);
    assert_eq!(report.succeeded, 2);
    assert_eq!(report.failed, 2);

    // Results come back in input order.
    let inputs: Vec<&PathBuf> = report.files.iter().map(|f| &f.input).collect();
    assert_eq!(inputs, paths.iter().collect::<Vec<_>>());

    assert!(report.files[0].is_ok());
    assert!(matches!(
        report.files[1].error,
        Some(FileError::ReadFailed { .. })
    ));
    assert!(matches!(report.files[3].error, Some(FileError::Empty { .. })));

    assert_eq!(
        std::fs::read_to_string(out.path().join("a.md_cleaned.txt")).unwrap(),
        "A\nalpha"
    );
    assert_eq!(
        std::fs::read_to_string(out.path().join("b.txt_cleaned.txt")).unwrap(),
        "beta"
    );

    assert_eq!(counter.started.load(Ordering::SeqCst), 4);
    assert_eq!(counter.completed.load(Ordering::SeqCst), 2);
    assert_eq!(counter.failed.load(Ordering::SeqCst), 2);
    assert_eq!(counter.batch_ok.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_strip_files_empty_batch() {
    let out = tempfile::tempdir().unwrap();
    let report = strip_files(&[], out.path(), &StripConfig::default()).await;
    assert_eq!(report.succeeded, 0);
    assert_eq!(report.failed, 0);
    assert!(report.files.is_empty());
}

#[tokio::test]
async fn test_strip_files_same_name_in_two_directories() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    std::fs::create_dir(src.path().join("a")).unwrap();
    std::fs::create_dir(src.path().join("b")).unwrap();

    let paths = vec![
        write(&src.path().join("a"), "notes.md", b"# first"),
        write(&src.path().join("b"), "notes.md", b"# second"),
    ];

    let report = strip_files(&paths, out.path(), &StripConfig::default()).await;
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failed, 1);

    let target = out.path().join("notes.md_cleaned.txt");
    assert_eq!(report.files[0].output.as_ref(), Some(&target));
    match &report.files[1].error {
        Some(FileError::DuplicateOutput { output, first, .. }) => {
            assert_eq!(output, &target);
            assert_eq!(first, &paths[0]);
        }
        other => panic!("expected duplicate output error, got {other:?}"),
    }

    assert_eq!(std::fs::read_to_string(&target).unwrap(), "first");
    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 1);
}
