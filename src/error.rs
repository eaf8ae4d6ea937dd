//! Error types for the edgequake-pdf2txt library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`Pdf2TxtError`] — **Fatal**: the batch cannot proceed at all
//!   (input directory missing, directory walk failed, bad ignore pattern).
//!   Returned as `Err(Pdf2TxtError)` from the top-level `convert_tree*`
//!   functions.
//!
//! * [`FileError`] — **Non-fatal**: a single file failed (corrupt PDF,
//!   unwritable output, failing post-hook) but every sibling file is
//!   unaffected. Stored inside [`crate::output::JobOutcome::Failed`] or only
//!   logged, never propagated past the job boundary.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the edgequake-pdf2txt library.
///
/// Per-file failures use [`FileError`] and are reported through
/// [`crate::output::JobOutcome`] rather than propagated here.
#[derive(Debug, Error)]
pub enum Pdf2TxtError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The input root does not exist.
    #[error("Input directory not found: '{path}'\nCheck the path exists and is readable.")]
    InputDirNotFound { path: PathBuf },

    /// The input root exists but is a file.
    #[error("Input path is not a directory: '{path}'")]
    NotADirectory { path: PathBuf },

    /// Recursive enumeration of the input tree failed part-way.
    #[error("Failed to walk '{path}': {detail}")]
    WalkFailed { path: PathBuf, detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// An `--ignore` pattern is not a valid shell glob.
    #[error("Invalid ignore pattern '{pattern}': {detail}")]
    InvalidPattern { pattern: String, detail: String },

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error (runtime setup, worker pool).
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single source file.
#[derive(Debug, Error)]
pub enum FileError {
    /// The PDF could not be opened or parsed: missing, corrupt, encrypted,
    /// or any other backend failure.
    #[error("Error extracting text from '{path}': {detail}")]
    ExtractionFailed { path: PathBuf, detail: String },

    /// The PDF parsed but has no pages, so there is no text to write.
    #[error("No text extracted from '{path}': document has no pages")]
    EmptyDocument { path: PathBuf },

    /// Document metadata could not be read.
    #[error("Error extracting metadata from '{path}': {detail}")]
    MetadataFailed { path: PathBuf, detail: String },

    /// Writing an output or sidecar file failed.
    #[error("Error saving '{path}': {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading the source file for its digest failed.
    #[error("Error hashing '{path}': {source}")]
    HashFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The post-hook could not be launched or exited non-zero.
    #[error("Error executing shell command '{command}' on '{path}': {detail}")]
    HookFailed {
        command: String,
        path: PathBuf,
        detail: String,
    },

    /// The worker running this job panicked.
    #[error("Worker panicked while processing '{path}': {detail}")]
    WorkerPanicked { path: PathBuf, detail: String },
}

impl FileError {
    /// Source or output path this error is attached to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            FileError::ExtractionFailed { path, .. }
            | FileError::EmptyDocument { path }
            | FileError::MetadataFailed { path, .. }
            | FileError::WriteFailed { path, .. }
            | FileError::HashFailed { path, .. }
            | FileError::HookFailed { path, .. }
            | FileError::WorkerPanicked { path, .. } => path,
        }
    }
}
