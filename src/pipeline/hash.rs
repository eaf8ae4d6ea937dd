//! Content digest for change detection.
//!
//! MD5 is used purely as a fast fingerprint; nothing here is a security
//! boundary.

use crate::error::FileError;
use std::path::Path;

/// Hex MD5 digest of the file's full byte content, read in one pass.
pub fn file_digest(path: &Path) -> Result<String, FileError> {
    let bytes = std::fs::read(path).map_err(|source| FileError::HashFailed {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(format!("{:x}", md5::compute(&bytes)))
}
