//! Fixture PDFs for unit and integration tests, built in memory with lopdf.
//!
//! `tests/common` includes this file by path, so both suites share one builder.

use lopdf::{dictionary, Document, Object, Stream};
use std::path::Path;

/// Description of a small text-only PDF.
#[derive(Debug, Clone, Default)]
pub struct PdfFixture {
    pub pages: Vec<String>,
    pub info: Vec<(String, String)>,
}

impl PdfFixture {
    /// One page per entry; an empty string produces a page with no text.
    pub fn pages(pages: &[&str]) -> Self {
        Self {
            pages: pages.iter().map(|p| p.to_string()).collect(),
            info: Vec::new(),
        }
    }

    pub fn with_info(mut self, key: &str, value: &str) -> Self {
        self.info.push((key.to_string(), value.to_string()));
        self
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let mut kids = Vec::with_capacity(self.pages.len());
        for text in &self.pages {
            let content = if text.is_empty() {
                b"q Q".to_vec()
            } else {
                format!("BT /F1 12 Tf 72 720 Td ({}) Tj ET", escape(text)).into_bytes()
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Contents" => content_id,
                "Resources" => dictionary! {
                    "Font" => dictionary! { "F1" => font_id },
                },
            });
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        if !self.info.is_empty() {
            let mut info = lopdf::Dictionary::new();
            for (k, v) in &self.info {
                info.set(k.as_bytes().to_vec(), Object::string_literal(v.as_str()));
            }
            let info_id = doc.add_object(info);
            doc.trailer.set("Info", info_id);
        }

        let mut buf = Vec::new();
        doc.save_to(&mut buf).expect("serialise fixture pdf");
        buf
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}

/// Write `fixture` to `path`, creating parent directories.
pub fn write_pdf(path: &Path, fixture: &PdfFixture) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create fixture dir");
    }
    std::fs::write(path, fixture.to_bytes()).expect("write fixture pdf");
}
