//! PDF extraction using pdf-extract

use std::panic::{self, AssertUnwindSafe};

use crate::domain::extraction::{
    DocumentExtractor, DocumentKind, ExtractedDocument, ExtractionError,
};

const PDF_MAGIC: &[u8] = b"%PDF";

/// Extracts the text layer of digital PDFs, page by page
#[derive(Debug, Clone, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extract_pages(bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
        // pdf-extract panics on some malformed inputs
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
        }));

        match result {
            Ok(Ok(pages)) => Ok(pages),
            Ok(Err(e)) => Err(ExtractionError::corrupt(DocumentKind::Pdf, e.to_string())),
            Err(_) => Err(ExtractionError::corrupt(
                DocumentKind::Pdf,
                "parser panicked on malformed document",
            )),
        }
    }
}

impl DocumentExtractor for PdfExtractor {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Pdf
    }

    fn extract(&self, bytes: &[u8]) -> Result<ExtractedDocument, ExtractionError> {
        if bytes.is_empty() {
            return Err(ExtractionError::NoTextFound);
        }

        if !bytes.starts_with(PDF_MAGIC) {
            return Err(ExtractionError::corrupt(
                DocumentKind::Pdf,
                "missing %PDF header",
            ));
        }

        let pages = Self::extract_pages(bytes)?;
        let page_count = pages.len();

        let text = pages
            .iter()
            .map(|page| page.trim())
            .filter(|page| !page.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        tracing::debug!(page_count, chars = text.len(), "PDF text extraction complete");

        ExtractedDocument::new(text, DocumentKind::Pdf).ok_or(ExtractionError::NoTextFound)
    }

    fn name(&self) -> &'static str {
        "pdf"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a PDF with one page per entry; empty entries produce blank pages.
    fn make_test_pdf(pages: &[&str]) -> Vec<u8> {
        use lopdf::dictionary;
        use lopdf::{Document, Object, Stream};

        let mut doc = Document::with_version("1.4");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let content = if text.is_empty() {
                String::new()
            } else {
                format!("BT /F1 12 Tf 72 700 Td ({text}) Tj ET")
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Contents" => content_id,
                "Resources" => dictionary! {
                    "Font" => dictionary! { "F1" => font_id },
                },
            });
            kids.push(page_id.into());
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

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_extract_digital_pdf() {
        let bytes = make_test_pdf(&["Hello World from the finance team"]);
        let doc = PdfExtractor::new().extract(&bytes).unwrap();

        assert!(doc.text().contains("Hello"), "got: {}", doc.text());
        assert_eq!(doc.kind(), DocumentKind::Pdf);
        assert!(doc.encoding().is_none());
    }

    #[test]
    fn test_blank_pages_skipped() {
        let bytes = make_test_pdf(&["First", "", "Third"]);
        let doc = PdfExtractor::new().extract(&bytes).unwrap();

        assert!(doc.text().contains("First"));
        assert!(doc.text().contains("Third"));
        assert!(!doc.text().contains("\n\n\n"));
    }

    #[test]
    fn test_all_blank_pages_is_no_text() {
        let bytes = make_test_pdf(&["", ""]);
        let err = PdfExtractor::new().extract(&bytes).unwrap_err();

        assert_eq!(err, ExtractionError::NoTextFound);
    }

    #[test]
    fn test_missing_magic_is_corrupt() {
        let err = PdfExtractor::new().extract(b"not a pdf").unwrap_err();
        assert_eq!(err.code(), "corrupt_document");
    }

    #[test]
    fn test_truncated_pdf_is_corrupt() {
        let bytes = make_test_pdf(&["Some content"]);
        let err = PdfExtractor::new().extract(&bytes[..40]).unwrap_err();

        assert_eq!(err.code(), "corrupt_document");
    }

    #[test]
    fn test_empty_bytes() {
        assert_eq!(
            PdfExtractor::new().extract(b"").unwrap_err(),
            ExtractionError::NoTextFound
        );
    }
}
