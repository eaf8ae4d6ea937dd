//! Batch entry points: discover PDFs, then fan jobs out across a worker pool.
//!
//! ## Worker pool
//!
//! Extraction is CPU-bound and every pipeline step does blocking file I/O,
//! so each job runs on `tokio::task::spawn_blocking`. `buffer_unordered`
//! caps the number in flight at `config.concurrency`, which gives a
//! fixed-size pool whose jobs may finish in any order.
//!
//! ## Logging on workers
//!
//! The caller's current `tracing` dispatcher is captured once and
//! re-entered on every worker thread, so a scoped subscriber set by an
//! embedder or a test sees worker events too, not only a global one.

use crate::config::BatchConfig;
use crate::error::{FileError, Pdf2TxtError};
use crate::job::{Job, JobSettings};
use crate::output::{BatchStats, JobOutcome};
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Recursively list every file under `input_dir` whose name ends in `.pdf`
/// (any case). Order follows the walk and carries no meaning.
///
/// # Errors
/// Fatal when the root is missing, is not a directory, or any entry in
/// the tree cannot be read.
pub fn discover_pdfs(input_dir: &Path) -> Result<Vec<PathBuf>, Pdf2TxtError> {
    if !input_dir.exists() {
        return Err(Pdf2TxtError::InputDirNotFound {
            path: input_dir.to_path_buf(),
        });
    }
    if !input_dir.is_dir() {
        return Err(Pdf2TxtError::NotADirectory {
            path: input_dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(input_dir) {
        let entry = entry.map_err(|e| Pdf2TxtError::WalkFailed {
            path: e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| input_dir.to_path_buf()),
            detail: e.to_string(),
        })?;
        if entry.file_type().is_file() && is_pdf_name(entry.path()) {
            files.push(entry.into_path());
        }
    }

    debug!("Discovered {} PDF files under {}", files.len(), input_dir.display());
    Ok(files)
}

fn is_pdf_name(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().to_lowercase().ends_with(".pdf"))
        .unwrap_or(false)
}

/// Convert every PDF under `config.input_dir`.
///
/// Per-file failures are logged and counted in the returned
/// [`BatchStats`]; they never abort sibling jobs.
///
/// # Errors
/// Returns `Err(Pdf2TxtError)` only for fatal errors: the input tree cannot
/// be enumerated.
pub async fn convert_tree(config: &BatchConfig) -> Result<BatchStats, Pdf2TxtError> {
    let start = Instant::now();
    let files = discover_pdfs(&config.input_dir)?;

    let mut stats = BatchStats {
        discovered: files.len(),
        dry_run: config.dry_run,
        ..Default::default()
    };

    if config.dry_run {
        info!("Dry run: would process {} PDF files", files.len());
        stats.duration_ms = start.elapsed().as_millis() as u64;
        return Ok(stats);
    }

    info!(
        "Processing {} PDF files from {} into {} with {} workers",
        files.len(),
        config.input_dir.display(),
        config.output_dir.display(),
        config.concurrency
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_start(files.len());
    }

    let settings = Arc::new(JobSettings::from_config(config));
    let dispatch = tracing::dispatcher::get_default(|d| d.clone());

    let results: Vec<(PathBuf, JobOutcome)> = stream::iter(files.into_iter().map(|source| {
        let job = Job::new(source, Arc::clone(&settings));
        let dispatch = dispatch.clone();
        let callback = config.progress_callback.clone();
        async move {
            let source = job.source().to_path_buf();
            if let Some(ref cb) = callback {
                cb.on_file_start(&source);
            }

            let outcome = tokio::task::spawn_blocking(move || {
                tracing::dispatcher::with_default(&dispatch, || job.run())
            })
            .await
            .unwrap_or_else(|e| {
                tracing::error!("Worker panicked while processing {}: {}", source.display(), e);
                JobOutcome::Failed(FileError::WorkerPanicked {
                    path: source.clone(),
                    detail: e.to_string(),
                })
            });

            if let Some(ref cb) = callback {
                cb.on_file_complete(&source, &outcome);
            }
            (source, outcome)
        }
    }))
    .buffer_unordered(config.concurrency)
    .collect()
    .await;

    for (source, outcome) in &results {
        stats.record(source, outcome);
    }
    stats.duration_ms = start.elapsed().as_millis() as u64;

    info!(
        "Finished: {} converted, {} unchanged, {} ignored, {} failed in {}ms",
        stats.converted, stats.unchanged, stats.ignored, stats.failed, stats.duration_ms
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_complete(&stats);
    }

    Ok(stats)
}

/// Synchronous wrapper around [`convert_tree`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_tree_sync(config: &BatchConfig) -> Result<BatchStats, Pdf2TxtError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Pdf2TxtError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(convert_tree(config))
}
