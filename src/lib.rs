//! # edgequake-pdf2txt
//!
//! Batch-convert a directory tree of PDF files into plain-text files.
//!
//! Text extraction itself is delegated to a PDF library (pure-Rust `lopdf`
//! by default, pdfium behind the `pdfium` feature). This crate is the batch
//! layer around it: discovery, a worker pool, ignore globs, mirrored or
//! flattened output layout, gzip output, metadata and hash sidecars,
//! change detection, and a per-file post-processing command.
//!
//! ## Pipeline Overview
//!
//! ```text
//! input dir
//!  │
//!  ├─ discover  every *.pdf, recursively (case-insensitive)
//!  └─ per file, on a worker pool:
//!      ├─ 1. Ignore     skip paths matching --ignore globs
//!      ├─ 2. Resolve    Y.txt under the output root (mirrored or flat)
//!      ├─ 3. HashCheck  skip if md5(source) == Y.txt.md5
//!      ├─ 4. Extract    page texts, one newline-terminated line per page
//!      ├─ 5. Write      Y.txt or Y.txt.gz
//!      ├─ 6. Hash       refresh Y.txt.md5
//!      ├─ 7. Metadata   Y.txt.meta.json
//!      └─ 8. Hook       run the shell command on the output
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edgequake_pdf2txt::{convert_tree, BatchConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BatchConfig::builder("papers/", "text/")
//!         .preserve_structure(true)
//!         .hash_check(true)
//!         .build()?;
//!     let stats = convert_tree(&config).await?;
//!     eprintln!("{} converted, {} unchanged, {} failed",
//!         stats.converted, stats.unchanged, stats.failed);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature  | Default | Description |
//! |----------|---------|-------------|
//! | `cli`    | on      | Enables the `pdf2txt` binary (clap + anyhow + indicatif + tracing-subscriber) |
//! | `pdfium` | off     | Adds [`pipeline::pdfium::PdfiumBackend`]; needs libpdfium at runtime |
//!
//! ## Logging
//!
//! The library only emits `tracing` events and never installs a
//! subscriber. Whatever dispatcher is current when [`convert_tree`] is
//! called receives the events from every worker.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod job;
pub mod output;
pub mod pipeline;
pub mod progress;

#[cfg(test)]
mod test_support;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{BatchConfig, BatchConfigBuilder};
pub use convert::{convert_tree, convert_tree_sync, discover_pdfs};
pub use error::{FileError, Pdf2TxtError};
pub use job::{Job, JobSettings};
pub use output::{BatchStats, FailedFile, JobOutcome};
pub use pipeline::extract::{BackendError, DocumentMetadata, LopdfBackend, PdfBackend};
pub use pipeline::hook::{HookRunner, ShellHook};
pub use progress::{BatchProgressCallback, NoopProgressCallback, ProgressCallback};
