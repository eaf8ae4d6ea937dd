//! Pipeline stages for PDF-to-text conversion.
//!
//! Each submodule implements exactly one step of the per-file pipeline and
//! is independently testable. The orchestrator in [`crate::job`] sequences
//! them; nothing here holds state across files.
//!
//! ## Data Flow
//!
//! ```text
//! ignore ──▶ paths ──▶ hash ──▶ extract ──▶ write ──▶ hook
//! (glob)    (resolve)  (md5)   (backend)   (txt/gz,   (shell)
//!                                           sidecars)
//! ```
//!
//! 1. [`ignore`]  — test the source path against the operator's globs
//! 2. [`paths`]   — derive `Y.txt` and its sidecar paths
//! 3. [`hash`]    — digest the source for change detection
//! 4. [`extract`] — page text and metadata via a [`extract::PdfBackend`]
//! 5. [`write`]   — text (optionally gzip), `.md5` and `.meta.json` sidecars
//! 6. [`hook`]    — run the post-processing command on the output

pub mod extract;
pub mod hash;
pub mod hook;
pub mod ignore;
pub mod paths;
#[cfg(feature = "pdfium")]
pub mod pdfium;
pub mod write;
