//! The per-file pipeline orchestrator.
//!
//! A [`Job`] is one source PDF plus the run-wide [`JobSettings`]. Running
//! it walks a fixed sequence and stops at the first terminal state:
//!
//! ```text
//! Start ─ignored──────────────────────────────────────────────▶ Done
//!   │
//! Resolve (output path, parent dir)
//!   │
//! HashCheck ─digest == sidecar──────────────────────────────────▶ Done
//!   │
//! Extract ─failed───────────────────────────────────────────────▶ Done
//!   │
//! Write ─failed─────────────────────────────────────────────────▶ Done
//!   │
//! UpdateHash ▶ Metadata ▶ PostHook (each logs and continues) ───▶ Done
//! ```
//!
//! Jobs share no mutable state and never wait on one another; every error
//! is caught here and reported through [`JobOutcome`].

use crate::config::BatchConfig;
use crate::error::FileError;
use crate::output::JobOutcome;
use crate::pipeline::extract::{self, PdfBackend};
use crate::pipeline::hook::{HookRunner, ShellHook};
use crate::pipeline::ignore::IgnoreMatcher;
use crate::pipeline::paths::OutputPaths;
use crate::pipeline::{hash, write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Run-wide, read-only settings shared by every job.
#[derive(Clone)]
pub struct JobSettings {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub preserve_structure: bool,
    pub compress: bool,
    pub extract_metadata: bool,
    pub hash_check: bool,
    pub ignore: IgnoreMatcher,
    pub hook: Option<Arc<dyn HookRunner>>,
    pub backend: Arc<dyn PdfBackend>,
}

impl JobSettings {
    pub fn from_config(config: &BatchConfig) -> Self {
        Self {
            input_dir: config.input_dir.clone(),
            output_dir: config.output_dir.clone(),
            preserve_structure: config.preserve_structure,
            compress: config.compress,
            extract_metadata: config.extract_metadata,
            hash_check: config.hash_check,
            ignore: config.ignore.clone(),
            hook: config
                .shell_command
                .clone()
                .map(|h: ShellHook| Arc::new(h) as Arc<dyn HookRunner>),
            backend: Arc::clone(&config.backend),
        }
    }
}

/// One unit of work. Immutable once built; consumed by one worker.
#[derive(Clone)]
pub struct Job {
    source: PathBuf,
    settings: Arc<JobSettings>,
}

impl Job {
    pub fn new(source: impl Into<PathBuf>, settings: Arc<JobSettings>) -> Self {
        Self {
            source: source.into(),
            settings,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Where this job's text output and sidecars live.
    pub fn output_paths(&self) -> OutputPaths {
        let s = &self.settings;
        OutputPaths::resolve(&self.source, &s.input_dir, &s.output_dir, s.preserve_structure)
    }

    /// Drive the job to completion.
    pub fn run(&self) -> JobOutcome {
        let s = &*self.settings;
        let source = self.source.as_path();

        // ── Start ────────────────────────────────────────────────────────
        if s.ignore.is_ignored(source, &s.input_dir) {
            info!("Ignoring {} based on ignore patterns", source.display());
            return JobOutcome::Ignored;
        }

        // ── Resolve ──────────────────────────────────────────────────────
        let paths = self.output_paths();
        if let Err(e) = paths.ensure_parent() {
            error!(
                "Error creating output directory for {}: {}",
                paths.text.display(),
                e
            );
            return JobOutcome::Failed(FileError::WriteFailed {
                path: paths.text,
                source: e,
            });
        }

        // ── HashCheck ────────────────────────────────────────────────────
        if s.hash_check {
            match self.is_unchanged(&paths) {
                Ok(true) => {
                    info!("Skipped unchanged {}", source.display());
                    return JobOutcome::Unchanged;
                }
                Ok(false) => {}
                Err(e) => {
                    error!("{}", e);
                    return JobOutcome::Failed(e);
                }
            }
        }

        // ── Extract ──────────────────────────────────────────────────────
        let extracted = match extract::extract_text(s.backend.as_ref(), source) {
            Ok(x) => x,
            Err(e) => return JobOutcome::Failed(e),
        };

        // ── Write ────────────────────────────────────────────────────────
        let output = paths.output(s.compress);
        if let Err(e) = write::write_text(&output, &extracted.text, s.compress) {
            error!("Error saving text to {}: {}", output.display(), e);
            return JobOutcome::Failed(e);
        }
        info!("Processed {} -> {}", source.display(), output.display());

        // ── UpdateHash ───────────────────────────────────────────────────
        // Re-read the source even if HashCheck already digested it.
        if s.hash_check {
            let sidecar = paths.hash_sidecar();
            if let Err(e) = hash::file_digest(source).and_then(|d| write::write_hash(&sidecar, &d)) {
                error!("Error updating hash for {}: {}", source.display(), e);
            }
        }

        // ── Metadata ─────────────────────────────────────────────────────
        let metadata_written = s.extract_metadata && self.save_metadata(&paths);

        // ── PostHook ─────────────────────────────────────────────────────
        let hook_succeeded = s.hook.as_ref().map(|hook| hook.run(&output).is_ok());

        JobOutcome::Converted {
            output,
            pages: extracted.pages,
            metadata_written,
            hook_succeeded,
        }
    }

    /// True when a hash sidecar exists and matches the current digest.
    fn is_unchanged(&self, paths: &OutputPaths) -> Result<bool, FileError> {
        let sidecar = paths.hash_sidecar();
        let stored = match write::read_hash(&sidecar) {
            Ok(Some(stored)) => stored,
            Ok(None) => return Ok(false),
            Err(e) => {
                warn!(
                    "Could not read hash sidecar {}: {}; reprocessing",
                    sidecar.display(),
                    e
                );
                return Ok(false);
            }
        };
        Ok(hash::file_digest(&self.source)? == stored)
    }

    fn save_metadata(&self, paths: &OutputPaths) -> bool {
        let metadata = match extract::extract_metadata(self.settings.backend.as_ref(), &self.source) {
            Ok(m) => m,
            Err(_) => return false,
        };
        if metadata.is_empty() {
            info!("No metadata found in {}", self.source.display());
            return false;
        }
        let meta_path = paths.meta_sidecar();
        match write::write_metadata(&meta_path, &metadata) {
            Ok(()) => {
                info!("Saved metadata to {}", meta_path.display());
                true
            }
            Err(e) => {
                error!("Error saving metadata to {}: {}", meta_path.display(), e);
                false
            }
        }
    }
}
