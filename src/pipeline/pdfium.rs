//! pdfium backend (feature `pdfium`).
//!
//! Binds the system libpdfium on every call. pdfium keeps thread-local
//! state, so each worker loads its own document; `thread_safe` in
//! pdfium-render serialises the underlying FFI calls.

use crate::pipeline::extract::{BackendError, DocumentMetadata, PdfBackend};
use pdfium_render::prelude::*;
use std::path::Path;

/// Metadata tags read from the document, with the key they are stored under.
const METADATA_TAGS: &[(PdfDocumentMetadataTagType, &str)] = &[
    (PdfDocumentMetadataTagType::Title, "Title"),
    (PdfDocumentMetadataTagType::Author, "Author"),
    (PdfDocumentMetadataTagType::Subject, "Subject"),
    (PdfDocumentMetadataTagType::Keywords, "Keywords"),
    (PdfDocumentMetadataTagType::Creator, "Creator"),
    (PdfDocumentMetadataTagType::Producer, "Producer"),
    (PdfDocumentMetadataTagType::CreationDate, "CreationDate"),
    (PdfDocumentMetadataTagType::ModificationDate, "ModDate"),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfiumBackend;

impl PdfiumBackend {
    fn bind() -> Result<Pdfium, BackendError> {
        Pdfium::bind_to_system_library()
            .map(Pdfium::new)
            .map_err(|e| BackendError(format!("failed to bind pdfium: {e:?}")))
    }
}

impl PdfBackend for PdfiumBackend {
    fn name(&self) -> &'static str {
        "pdfium"
    }

    fn page_texts(&self, path: &Path) -> Result<Vec<String>, BackendError> {
        let pdfium = Self::bind()?;
        let document = pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| BackendError(format!("{e:?}")))?;

        document
            .pages()
            .iter()
            .enumerate()
            .map(|(idx, page)| {
                page.text()
                    .map(|t| t.all())
                    .map_err(|e| BackendError(format!("page {}: {e:?}", idx + 1)))
            })
            .collect()
    }

    fn metadata(&self, path: &Path) -> Result<DocumentMetadata, BackendError> {
        let pdfium = Self::bind()?;
        let document = pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| BackendError(format!("{e:?}")))?;
        let metadata = document.metadata();

        Ok(METADATA_TAGS
            .iter()
            .filter_map(|(tag, key)| {
                metadata.get(*tag).and_then(|t| {
                    let v = t.value().to_string();
                    if v.is_empty() {
                        None
                    } else {
                        Some((key.to_string(), v))
                    }
                })
            })
            .collect())
    }
}
