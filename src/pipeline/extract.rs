//! Text and metadata extraction, delegated to a pluggable PDF backend.
//!
//! The pipeline only ever talks to [`PdfBackend`]. The default
//! [`LopdfBackend`] is pure Rust and needs no native library; the optional
//! `pdfium` feature adds [`crate::pipeline::pdfium::PdfiumBackend`].
//!
//! ## Page assembly
//!
//! Each page contributes exactly one segment followed by `\n`, in page
//! order. A page with no text still contributes an empty line, so an
//! N-page document always yields N newline-terminated segments.

use crate::error::FileError;
use lopdf::{Document, Object};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, error};

/// Document metadata: PDF info-dictionary keys (without the leading `/`)
/// mapped to their textual values.
pub type DocumentMetadata = BTreeMap<String, String>;

/// Opaque failure reported by a backend; carries the library's own message.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct BackendError(pub String);

/// A PDF parsing library capable of per-page text and metadata extraction.
///
/// Implementations must be `Send + Sync`: one backend instance is shared by
/// every worker in the pool.
pub trait PdfBackend: Send + Sync {
    /// Short identifier used in log lines.
    fn name(&self) -> &'static str;

    /// Text of every page, in page order. Missing text is an empty string.
    fn page_texts(&self, path: &Path) -> Result<Vec<String>, BackendError>;

    /// The document's metadata mapping.
    fn metadata(&self, path: &Path) -> Result<DocumentMetadata, BackendError>;
}

/// Extracted text of one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
    pub pages: usize,
}

/// Run the backend and join pages with newline terminators.
///
/// Every failure collapses into [`FileError::ExtractionFailed`] (or
/// [`FileError::EmptyDocument`] for a zero-page file) and is logged here
/// with the source path.
pub fn extract_text(backend: &dyn PdfBackend, path: &Path) -> Result<ExtractedText, FileError> {
    let pages = backend.page_texts(path).map_err(|e| {
        error!("Error extracting text from {}: {}", path.display(), e);
        FileError::ExtractionFailed {
            path: path.to_path_buf(),
            detail: e.0,
        }
    })?;

    if pages.is_empty() {
        error!("No text extracted from {}: document has no pages", path.display());
        return Err(FileError::EmptyDocument {
            path: path.to_path_buf(),
        });
    }

    let text = assemble_pages(&pages);
    debug!(
        "Extracted {} pages ({} bytes) from {} via {}",
        pages.len(),
        text.len(),
        path.display(),
        backend.name()
    );

    Ok(ExtractedText {
        text,
        pages: pages.len(),
    })
}

/// Read document metadata. Failures are logged and returned; callers treat
/// them as non-fatal.
pub fn extract_metadata(
    backend: &dyn PdfBackend,
    path: &Path,
) -> Result<DocumentMetadata, FileError> {
    backend.metadata(path).map_err(|e| {
        error!("Error extracting metadata from {}: {}", path.display(), e);
        FileError::MetadataFailed {
            path: path.to_path_buf(),
            detail: e.0,
        }
    })
}

fn assemble_pages(pages: &[String]) -> String {
    let capacity = pages.iter().map(|p| p.len() + 1).sum();
    let mut text = String::with_capacity(capacity);
    for page in pages {
        text.push_str(page);
        text.push('\n');
    }
    text
}

// ── lopdf backend ────────────────────────────────────────────────────────

/// Placeholder lopdf emits for glyphs in Identity-H fonts it cannot map.
const IDENTITY_H_MARKER: &str = "?Identity-H Unimplemented?";

/// Pure-Rust backend built on [`lopdf`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfBackend;

impl LopdfBackend {
    fn load(path: &Path) -> Result<Document, BackendError> {
        Document::load(path).map_err(|e| BackendError(e.to_string()))
    }
}

impl PdfBackend for LopdfBackend {
    fn name(&self) -> &'static str {
        "lopdf"
    }

    fn page_texts(&self, path: &Path) -> Result<Vec<String>, BackendError> {
        let doc = Self::load(path)?;
        doc.get_pages()
            .into_keys()
            .map(|page_num| {
                doc.extract_text(&[page_num])
                    .map(|raw| clean_page_text(&raw))
                    .map_err(|e| BackendError(format!("page {page_num}: {e}")))
            })
            .collect()
    }

    fn metadata(&self, path: &Path) -> Result<DocumentMetadata, BackendError> {
        let doc = Self::load(path)?;
        info_dictionary(&doc)
    }
}

/// lopdf closes every text object with a newline; strip those so a page is
/// one segment, and drop the unmapped-glyph marker.
fn clean_page_text(raw: &str) -> String {
    raw.replace(IDENTITY_H_MARKER, "")
        .trim_end_matches(&['\r', '\n'][..])
        .to_string()
}

fn info_dictionary(doc: &Document) -> Result<DocumentMetadata, BackendError> {
    let info = match doc.trailer.get(b"Info") {
        Ok(obj) => obj,
        // No info dictionary is a valid, empty mapping.
        Err(_) => return Ok(DocumentMetadata::new()),
    };

    let dict = match info {
        Object::Reference(id) => doc
            .get_dictionary(*id)
            .map_err(|e| BackendError(format!("Info dictionary: {e}")))?,
        Object::Dictionary(dict) => dict,
        _ => return Err(BackendError("Info entry is not a dictionary".into())),
    };

    Ok(dict
        .iter()
        .filter_map(|(key, value)| {
            render_value(doc, value, 1)
                .map(|v| (String::from_utf8_lossy(key).into_owned(), v))
        })
        .collect())
}

fn render_value(doc: &Document, obj: &Object, follow: u8) -> Option<String> {
    match obj {
        Object::String(bytes, _) => Some(decode_text_string(bytes)),
        Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        Object::Integer(i) => Some(i.to_string()),
        Object::Real(r) => Some(r.to_string()),
        Object::Boolean(b) => Some(b.to_string()),
        Object::Reference(id) if follow > 0 => doc
            .get_object(*id)
            .ok()
            .and_then(|o| render_value(doc, o, follow - 1)),
        _ => None,
    }
}

/// Decode a PDF text string: UTF-16BE when it carries a BOM, otherwise
/// PDFDocEncoding (treated as Latin-1, which agrees on the printable range).
fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    if let Some(utf8) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return String::from_utf8_lossy(utf8).into_owned();
    }
    bytes.iter().map(|&b| b as char).collect()
}
