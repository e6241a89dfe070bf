//! CLI binary for mdstrip.
//!
//! A thin shim over the library crate that maps CLI flags to `StripConfig`
//! and prints or saves the cleaned text.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use mdstrip::pipeline::{download, input};
use mdstrip::{
    rules, strip_file, strip_files, strip_text, DecodePolicy, ProgressCallback, Replacement,
    StripConfig, StripError, StripOutput, StripProgressCallback,
};
use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

/// How `--list-rules` shows what a rule rewrites its matches to.
fn describe_replacement(replacement: Replacement) -> String {
    match replacement {
        Replacement::Remove => "→ removed".to_string(),
        Replacement::Template(t) => format!("→ {t:?}"),
        Replacement::FirstCapture => "→ inner text".to_string(),
    }
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback for batch runs: one bar plus a log line per
/// file. Files finish out of order, so lines are printed as they complete.
struct CliProgressCallback {
    bar: ProgressBar,
    errors: AtomicUsize,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}/{len} files  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");

        let bar = ProgressBar::new(0);
        bar.set_style(style);
        bar.set_prefix("Stripping");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            errors: AtomicUsize::new(0),
        })
    }
}

impl StripProgressCallback for CliProgressCallback {
    fn on_batch_start(&self, total_files: usize) {
        self.bar.set_length(total_files as u64);
    }

    fn on_file_start(&self, _index: usize, _total: usize, name: &str) {
        self.bar.set_message(name.to_string());
    }

    fn on_file_complete(&self, _index: usize, _total: usize, name: &str, output_len: usize) {
        self.bar.println(format!(
            "  {} {:<40}  {}",
            green("✓"),
            name,
            dim(&format!("{output_len:>7} bytes")),
        ));
        self.bar.inc(1);
    }

    fn on_file_error(&self, _index: usize, _total: usize, name: &str, error: &str) {
        self.errors.fetch_add(1, Ordering::SeqCst);
        let first_line = error.lines().next().unwrap_or(error);
        self.bar
            .println(format!("  {} {:<40}  {}", red("✗"), name, red(first_line)));
        self.bar.inc(1);
    }

    fn on_batch_complete(&self, total_files: usize, success_count: usize) {
        self.bar.finish_and_clear();
        let failed = self.errors.load(Ordering::SeqCst);
        if failed == 0 {
            eprintln!(
                "{} {} files stripped",
                green("✔"),
                bold(&success_count.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} files stripped  ({} failed)",
                if success_count == 0 { red("✘") } else { yellow("⚠") },
                bold(&success_count.to_string()),
                total_files,
                red(&failed.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Strip a file to stdout
  mdstrip README.md

  # Pipe text through
  cat notes.md | mdstrip

  # Strip text given on the command line
  mdstrip --text '# Title with **bold**'

  # Save next to the source as README.md_cleaned.txt
  mdstrip README.md -o .

  # Strip a whole folder into out/
  mdstrip docs/*.md --output-dir out/

  # Machine-readable result
  mdstrip --json README.md

  # Show the rewrite rules in the order they run
  mdstrip --list-rules
"#;

/// Remove Markdown syntax from text and files.
#[derive(Parser, Debug)]
#[command(
    name = "mdstrip",
    version,
    about = "Remove Markdown syntax from text and files, keeping the readable content",
    long_about = "Remove Markdown syntax (code fences, inline code, images, links, emphasis, \
headings, blockquotes, rules, tables, list markers) and normalise whitespace, leaving plain text. \
Reads files, --text, or standard input.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Markdown or text files (.md, .markdown, .txt). Reads stdin when omitted.
    inputs: Vec<PathBuf>,

    /// Strip this text instead of reading files or stdin.
    #[arg(long, conflicts_with = "inputs")]
    text: Option<String>,

    /// Write the result to this file, or into this directory under the
    /// derived `<name>_cleaned.txt` name.
    #[arg(short, long, env = "MDSTRIP_OUTPUT", conflicts_with = "output_dir")]
    output: Option<PathBuf>,

    /// Write every input to this directory as `<name>_cleaned.txt`.
    #[arg(short = 'd', long, env = "MDSTRIP_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Suffix appended to the source file name for saved output.
    #[arg(long, env = "MDSTRIP_SUFFIX", default_value = "_cleaned")]
    suffix: String,

    /// Files processed at once in batch mode.
    #[arg(short, long, env = "MDSTRIP_CONCURRENCY", default_value_t = 4)]
    concurrency: usize,

    /// Replace undecodable bytes with U+FFFD instead of dropping them.
    #[arg(long, env = "MDSTRIP_REPLACE_INVALID")]
    replace_invalid: bool,

    /// Do not convert CRLF line endings to LF before stripping.
    #[arg(long, env = "MDSTRIP_KEEP_LINE_ENDINGS")]
    keep_line_endings: bool,

    /// Accept files with any extension.
    #[arg(long, env = "MDSTRIP_ANY_EXTENSION")]
    any_extension: bool,

    /// Output structured JSON instead of plain text.
    #[arg(long, env = "MDSTRIP_JSON")]
    json: bool,

    /// Disable the progress bar in batch mode.
    #[arg(long, env = "MDSTRIP_NO_PROGRESS")]
    no_progress: bool,

    /// Print the rewrite rules in order and exit.
    #[arg(long)]
    list_rules: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MDSTRIP_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "MDSTRIP_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // A directory target with file inputs, or several files, is a batch run.
    let batch = cli.inputs.len() > 1 || (cli.output_dir.is_some() && !cli.inputs.is_empty());
    let show_progress = batch && !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Rule listing ─────────────────────────────────────────────────────
    if cli.list_rules {
        for (i, rule) in rules().iter().enumerate() {
            println!(
                "{:>2}. {:<22} {:<44} {}",
                i + 1,
                rule.name,
                rule.pattern().as_str(),
                dim(&describe_replacement(rule.replacement())),
            );
        }
        println!(
            "{:>2}. {:<22} (leading/trailing whitespace)",
            rules().len() + 1,
            "trim"
        );
        return Ok(());
    }

    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn StripProgressCallback>)
    } else {
        None
    };
    let config = build_config(&cli, progress_cb)?;

    // ── Batch mode ───────────────────────────────────────────────────────
    if batch {
        let Some(ref output_dir) = cli.output_dir else {
            anyhow::bail!("Multiple inputs need --output-dir <DIR> to write results into");
        };

        let report = strip_files(&cli.inputs, output_dir, &config).await;

        if cli.json {
            let json =
                serde_json::to_string_pretty(&report).context("Failed to serialise output")?;
            println!("{json}");
        } else if !cli.quiet && !show_progress {
            eprintln!(
                "Stripped {}/{} files in {}ms",
                report.succeeded,
                report.files.len(),
                report.duration_ms
            );
            for f in report.files.iter().filter_map(|f| f.error.as_ref()) {
                eprintln!("  {}", f);
            }
        }

        if report.succeeded == 0 {
            anyhow::bail!("No files could be stripped");
        }
        return Ok(());
    }

    // ── Single input ─────────────────────────────────────────────────────
    let result = if let Some(ref text) = cli.text {
        strip_text(text, &config)
    } else if let Some(path) = cli.inputs.first() {
        strip_file(path, &config).await
    } else if io::stdin().is_terminal() {
        Err(StripError::NoInput)
    } else {
        let text = read_stdin(config.decode_policy)?;
        strip_text(&text, &config)
    };

    let output = match result {
        Ok(o) => o,
        Err(e) if e.is_warning() => {
            warn_no_input(cli.quiet);
            return Ok(());
        }
        Err(e) => return Err(e).context("Strip failed"),
    };

    let target = match (&cli.output, &cli.output_dir) {
        (Some(out), _) => Some(resolve_output_path(out, &output)),
        (None, Some(dir)) => Some(dir.join(&output.download_name)),
        (None, None) => None,
    };

    if let Some(ref path) = target {
        download::write_atomic(path, &output.text)
            .await
            .context("Failed to save cleaned text")?;
        if !cli.quiet {
            eprintln!(
                "{}  {} → {} bytes {}  →  {}",
                green("✔"),
                output.stats.input_bytes,
                output.stats.output_bytes,
                dim(&format!("(-{:.0}%)", output.stats.reduction() * 100.0)),
                bold(&path.display().to_string()),
            );
        }
    }

    if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        println!("{json}");
    } else if target.is_none() {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(output.text.as_bytes())
            .context("Failed to write to stdout")?;
        if !output.text.is_empty() {
            handle.write_all(b"\n").ok();
        }
    }

    Ok(())
}

/// Map CLI args to `StripConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<StripConfig> {
    let policy = if cli.replace_invalid {
        DecodePolicy::Replace
    } else {
        DecodePolicy::Ignore
    };

    let mut builder = StripConfig::builder()
        .concurrency(cli.concurrency)
        .decode_policy(policy)
        .normalise_line_endings(!cli.keep_line_endings)
        .accept_any_extension(cli.any_extension)
        .output_suffix(cli.suffix.clone());

    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

/// A directory target receives the derived download name.
fn resolve_output_path(target: &Path, output: &StripOutput) -> PathBuf {
    if target.is_dir() {
        target.join(&output.download_name)
    } else {
        target.to_path_buf()
    }
}

fn read_stdin(policy: DecodePolicy) -> Result<String> {
    let mut bytes = Vec::new();
    io::stdin()
        .lock()
        .read_to_end(&mut bytes)
        .context("Failed to read stdin")?;
    Ok(input::decode_bytes(&bytes, policy))
}

fn warn_no_input(quiet: bool) {
    if !quiet {
        eprintln!("{} {}", yellow("⚠"), StripError::NoInput);
    }
}
