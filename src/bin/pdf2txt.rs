//! CLI binary for edgequake-pdf2txt.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `BatchConfig`, wires the log file, and prints the run summary.

use anyhow::{Context, Result};
use clap::Parser;
use edgequake_pdf2txt::{
    convert_tree, BatchConfig, BatchProgressCallback, BatchStats, JobOutcome, ProgressCallback,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_LOG_FILE: &str = "pdf2txt.log";

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one bar counting completed files, with a
/// log line above it for every file that fails. Files complete out of
/// order, so only counters are kept.
struct CliProgressCallback {
    bar: ProgressBar,
    errors: AtomicUsize,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>4}/{len} files  \
             ⏱ {elapsed_precise}  ETA {eta_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(style);
        bar.set_prefix("Processing PDFs");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            errors: AtomicUsize::new(0),
        })
    }
}

impl BatchProgressCallback for CliProgressCallback {
    fn on_batch_start(&self, total_files: usize) {
        self.bar.set_length(total_files as u64);
        self.bar.reset_eta();
    }

    fn on_file_start(&self, source: &Path) {
        if let Some(name) = source.file_name() {
            self.bar.set_message(name.to_string_lossy().into_owned());
        }
    }

    fn on_file_complete(&self, source: &Path, outcome: &JobOutcome) {
        if let JobOutcome::Failed(e) = outcome {
            self.errors.fetch_add(1, Ordering::SeqCst);
            let msg = e.to_string();
            // Truncate very long error messages to keep output tidy.
            let msg = match msg.char_indices().nth(100) {
                Some((idx, _)) => format!("{}\u{2026}", &msg[..idx]),
                None => msg,
            };
            self.bar.println(format!(
                "  {} {}  {}",
                red("✗"),
                source.display(),
                dim(&msg)
            ));
        }
        self.bar.inc(1);
    }

    fn on_batch_complete(&self, _stats: &BatchStats) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Flatten every PDF under papers/ into text/
  pdf2txt papers/ text/

  # Mirror the directory layout and gzip the output
  pdf2txt --preserve-structure --compress papers/ text/

  # Skip temporary files and re-runs of unchanged inputs
  pdf2txt --hash-check papers/ text/ --ignore "*.tmp.pdf" "*/drafts/*"

  # Write metadata sidecars and count words in every output
  pdf2txt --extract-meta --shell-command "wc -w {}" papers/ text/

  # See how many files would be processed
  pdf2txt --dry-run papers/ text/

OUTPUT LAYOUT (for papers/a/b.pdf with --preserve-structure):
  text/a/b.txt            extracted text (b.txt.gz with --compress)
  text/a/b.txt.md5        source digest (--hash-check)
  text/a/b.txt.meta.json  document metadata (--extract-meta)

SECURITY:
  --shell-command is run through the system shell for every output file.
  Only pass templates you trust.
"#;

/// Convert a directory tree of PDF files to plain text.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2txt",
    version,
    about = "Convert a directory tree of PDF files to plain text",
    long_about = "Convert every PDF under an input directory to a plain-text file under an \
output directory, optionally mirroring the directory layout, gzip-compressing the output, \
writing metadata sidecars, skipping unchanged inputs by MD5, and running a shell command \
on every output file.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Input directory containing PDF files.
    input_dir: PathBuf,

    /// Output directory for text files.
    output_dir: PathBuf,

    /// Preserve directory structure in output.
    #[arg(long, env = "PDF2TXT_PRESERVE_STRUCTURE")]
    preserve_structure: bool,

    /// Compress output text files with gzip.
    #[arg(long, env = "PDF2TXT_COMPRESS")]
    compress: bool,

    /// Extract and save PDF metadata as <output>.meta.json.
    #[arg(long, env = "PDF2TXT_EXTRACT_META")]
    extract_meta: bool,

    /// Glob patterns to ignore (e.g. '*.tmp.pdf').
    #[arg(long, num_args = 0.., value_name = "PATTERN")]
    ignore: Vec<String>,

    /// Shell command to run on each output file ({} is replaced with its path,
    /// which ends in .txt.gz with --compress).
    #[arg(long, env = "PDF2TXT_SHELL_COMMAND", value_name = "TEMPLATE")]
    shell_command: Option<String>,

    /// Count the PDF files that would be processed; write nothing.
    #[arg(long, env = "PDF2TXT_DRY_RUN")]
    dry_run: bool,

    /// Log file path.
    #[arg(long, env = "PDF2TXT_LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Use an MD5 sidecar to skip PDFs that have not changed.
    #[arg(long, env = "PDF2TXT_HASH_CHECK")]
    hash_check: bool,

    /// Number of files processed in parallel (default: available CPUs).
    #[arg(short, long, env = "PDF2TXT_CONCURRENCY")]
    concurrency: Option<usize>,

    /// Extract with pdfium (libpdfium must be on the library path).
    #[cfg(feature = "pdfium")]
    #[arg(long, env = "PDF2TXT_PDFIUM")]
    pdfium: bool,

    /// Print the run summary as JSON on stdout.
    #[arg(long, env = "PDF2TXT_JSON")]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "PDF2TXT_NO_PROGRESS")]
    no_progress: bool,

    /// Log at DEBUG level and mirror log events to stderr.
    #[arg(short, long, env = "PDF2TXT_VERBOSE")]
    verbose: bool,

    /// Suppress all console output except errors.
    #[arg(short, long, env = "PDF2TXT_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    init_logging(&cli)?;

    // ── Build config ─────────────────────────────────────────────────────
    let show_progress =
        !cli.quiet && !cli.no_progress && !cli.json && !cli.dry_run && std::io::stderr().is_terminal();

    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn BatchProgressCallback>)
    } else {
        None
    };

    // ── Run ──────────────────────────────────────────────────────────────
    let result = match build_config(&cli, progress_cb) {
        Ok(config) => convert_tree(&config).await.context("Batch conversion failed"),
        Err(e) => Err(e),
    };

    match result {
        Ok(stats) => {
            report(&cli, &stats)?;
            Ok(())
        }
        Err(e) => {
            tracing::error!("An error occurred: {:#}", e);
            eprintln!(
                "{} An error occurred. Check {} for details.",
                red("✘"),
                bold(&cli.log_file.display().to_string())
            );
            std::process::exit(1);
        }
    }
}

/// Install the log-file layer (and a stderr mirror with `--verbose`).
fn init_logging(cli: &Cli) -> Result<()> {
    if let Some(parent) = cli.log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&cli.log_file)
        .with_context(|| format!("Failed to open log file {}", cli.log_file.display()))?;

    let level = if cli.verbose { "debug" } else { "info" };
    let file_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = cli.verbose.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(EnvFilter::new("debug"))
    });

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false)
                .with_filter(file_filter),
        )
        .with(stderr_layer)
        .init();

    Ok(())
}

/// Map CLI args to `BatchConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<BatchConfig> {
    let mut builder = BatchConfig::builder(&cli.input_dir, &cli.output_dir)
        .preserve_structure(cli.preserve_structure)
        .compress(cli.compress)
        .extract_metadata(cli.extract_meta)
        .hash_check(cli.hash_check)
        .ignore_patterns(cli.ignore.iter().cloned())
        .dry_run(cli.dry_run);

    if let Some(ref template) = cli.shell_command {
        builder = builder.shell_command(template.clone());
    }
    if let Some(n) = cli.concurrency {
        builder = builder.concurrency(n);
    }
    #[cfg(feature = "pdfium")]
    if cli.pdfium {
        builder = builder.backend(Arc::new(edgequake_pdf2txt::pipeline::pdfium::PdfiumBackend));
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

/// Print the end-of-run summary.
fn report(cli: &Cli, stats: &BatchStats) -> Result<()> {
    if cli.json {
        let json = serde_json::to_string_pretty(stats).context("Failed to serialise summary")?;
        println!("{json}");
        return Ok(());
    }
    if cli.quiet {
        return Ok(());
    }

    if stats.dry_run {
        println!("Would process {} PDF files", stats.discovered);
        return Ok(());
    }

    println!("All PDF files have been processed.");
    eprintln!(
        "{}  {} converted  {} unchanged  {} ignored  {}  {}",
        if stats.failed == 0 { green("✔") } else { cyan("⚠") },
        bold(&stats.converted.to_string()),
        stats.unchanged,
        stats.ignored,
        if stats.failed == 0 {
            dim("0 failed")
        } else {
            red(&format!("{} failed", stats.failed))
        },
        dim(&format!("{}ms", stats.duration_ms)),
    );
    if stats.failed > 0 {
        eprintln!(
            "   {}",
            dim(&format!("see {} for details", cli.log_file.display()))
        );
    }
    Ok(())
}
