//! Shared helpers for integration tests.

#![allow(dead_code)]

#[path = "../../src/test_support.rs"]
mod fixture;

pub use fixture::PdfFixture;
use std::path::Path;

/// Write a PDF with one text line per entry of `pages`, creating parents.
pub fn write_pdf(path: &Path, pages: &[&str]) {
    fixture::write_pdf(path, &PdfFixture::pages(pages));
}

/// Like [`write_pdf`], with info-dictionary entries.
pub fn write_pdf_with_info(path: &Path, pages: &[&str], info: &[(&str, &str)]) {
    let pdf = info
        .iter()
        .fold(PdfFixture::pages(pages), |pdf, (k, v)| pdf.with_info(k, v));
    fixture::write_pdf(path, &pdf);
}
