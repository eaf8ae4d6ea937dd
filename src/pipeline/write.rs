//! Output writer: text (plain or gzip), hash sidecar, metadata sidecar.
//!
//! Each write is independently failable and returns a [`FileError`]; the
//! orchestrator decides whether a failure ends the job or is only logged.
//! Text output goes to a uniquely named temp file in the destination
//! directory and is persisted over the target, so a crashed write never
//! leaves a truncated `.txt` behind and concurrent writers of one path
//! never share a temp file.

use crate::error::FileError;
use crate::pipeline::extract::DocumentMetadata;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Write `text` to `path` (the caller picks `Y.txt` or `Y.txt.gz`).
///
/// When several jobs target the same path the last one to persist wins;
/// none of them fails because of the others.
pub fn write_text(path: &Path, text: &str, compress: bool) -> Result<(), FileError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    // Dropping `tmp` on an early return deletes the temp file.
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| write_failed(path, e))?;
    write_body(tmp.as_file_mut(), text, compress).map_err(|e| write_failed(path, e))?;
    tmp.persist(path).map_err(|e| write_failed(path, e.error))?;
    Ok(())
}

fn write_body<W: Write>(out: W, text: &str, compress: bool) -> std::io::Result<()> {
    let file = BufWriter::new(out);
    if compress {
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(text.as_bytes())?;
        encoder.finish()?.flush()
    } else {
        let mut file = file;
        file.write_all(text.as_bytes())?;
        file.flush()
    }
}

/// Overwrite the hash sidecar with the bare hex digest.
pub fn write_hash(path: &Path, digest: &str) -> Result<(), FileError> {
    std::fs::write(path, digest).map_err(|e| write_failed(path, e))
}

/// Stored digest, or `None` when the sidecar does not exist.
pub fn read_hash(path: &Path) -> std::io::Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(s) => Ok(Some(s.trim().to_string())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Write metadata as 2-space-indented JSON.
pub fn write_metadata(path: &Path, metadata: &DocumentMetadata) -> Result<(), FileError> {
    let json = serde_json::to_string_pretty(metadata)
        .map_err(|e| write_failed(path, std::io::Error::other(e)))?;
    std::fs::write(path, json).map_err(|e| write_failed(path, e))
}

fn write_failed(path: &Path, source: std::io::Error) -> FileError {
    FileError::WriteFailed {
        path: PathBuf::from(path),
        source,
    }
}
