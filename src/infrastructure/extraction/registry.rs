//! Kind-to-extractor dispatch

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::extraction::{
    extension_of, DocumentExtractor, DocumentKind, ExtractedDocument, ExtractionError,
    IngestRequest,
};

use super::{DocxExtractor, PdfExtractor, PlainTextExtractor};

/// Routes each document kind to its extractor
#[derive(Debug, Clone)]
pub struct ExtractorRegistry {
    extractors: HashMap<DocumentKind, Arc<dyn DocumentExtractor>>,
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new(vec![
            Arc::new(PlainTextExtractor::new()),
            Arc::new(PdfExtractor::new()),
            Arc::new(DocxExtractor::new()),
        ])
    }
}

impl ExtractorRegistry {
    pub fn new(extractors: Vec<Arc<dyn DocumentExtractor>>) -> Self {
        Self {
            extractors: extractors.into_iter().map(|e| (e.kind(), e)).collect(),
        }
    }

    pub fn supports(&self, kind: DocumentKind) -> bool {
        self.extractors.contains_key(&kind)
    }

    /// Synchronous extraction; parses on the calling thread
    pub fn extract(&self, bytes: &[u8], kind: DocumentKind) -> Result<ExtractedDocument, ExtractionError> {
        let extractor = self
            .extractors
            .get(&kind)
            .ok_or_else(|| ExtractionError::unsupported(kind.extension()))?;

        extractor.extract(bytes)
    }

    /// Extract on the blocking pool, for use from async handlers and the batch loop
    pub async fn extract_blocking(
        &self,
        request: IngestRequest,
    ) -> Result<ExtractedDocument, ExtractionError> {
        let kind = request.kind();
        let extractor = self
            .extractors
            .get(&kind)
            .cloned()
            .ok_or_else(|| ExtractionError::unsupported(kind.extension()))?;

        tokio::task::spawn_blocking(move || extractor.extract(request.bytes()))
            .await
            .map_err(|e| ExtractionError::corrupt(kind, format!("extraction task failed: {}", e)))?
    }
}

/// Detect the document kind from a file name, falling back to a MIME type
pub fn detect_kind(
    file_name: Option<&str>,
    content_type: Option<&str>,
) -> Result<DocumentKind, ExtractionError> {
    if let Some(kind) = file_name.and_then(DocumentKind::from_filename) {
        return Ok(kind);
    }

    if let Some(kind) = content_type.and_then(DocumentKind::from_mime) {
        return Ok(kind);
    }

    let extension = file_name
        .map(extension_of)
        .filter(|e| !e.is_empty())
        .or_else(|| content_type.map(str::to_string))
        .unwrap_or_else(|| "unknown".to_string());

    Err(ExtractionError::unsupported(extension))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::extraction::MockDocumentExtractor;

    #[test]
    fn test_dispatch_by_kind() {
        let registry = ExtractorRegistry::new(vec![Arc::new(
            MockDocumentExtractor::new(DocumentKind::Pdf).with_text("from mock"),
        )]);

        let doc = registry.extract(b"%PDF", DocumentKind::Pdf).unwrap();
        assert_eq!(doc.text(), "from mock");

        let err = registry.extract(b"hello", DocumentKind::Docx).unwrap_err();
        assert_eq!(err, ExtractionError::unsupported(".docx"));
    }

    #[test]
    fn test_default_registry_supports_all_kinds() {
        let registry = ExtractorRegistry::default();

        for kind in DocumentKind::ALL {
            assert!(registry.supports(kind));
        }
    }

    #[tokio::test]
    async fn test_extract_blocking() {
        let registry = ExtractorRegistry::default();
        let request = IngestRequest::new(b"Hello from the blocking pool".to_vec(), DocumentKind::Text);

        let doc = registry.extract_blocking(request).await.unwrap();
        assert_eq!(doc.text(), "Hello from the blocking pool");
    }

    #[tokio::test]
    async fn test_extract_blocking_propagates_errors() {
        let registry = ExtractorRegistry::default();
        let request = IngestRequest::new(b"garbage".to_vec(), DocumentKind::Pdf);

        let err = registry.extract_blocking(request).await.unwrap_err();
        assert_eq!(err.code(), "corrupt_document");
    }

    #[test]
    fn test_detect_kind() {
        assert_eq!(detect_kind(Some("Memo.PDF"), None).unwrap(), DocumentKind::Pdf);
        assert_eq!(
            detect_kind(Some("upload"), Some("text/plain; charset=utf-8")).unwrap(),
            DocumentKind::Text
        );
        assert_eq!(
            detect_kind(Some("sheet.csv"), Some("text/csv")).unwrap_err(),
            ExtractionError::unsupported(".csv")
        );
        assert_eq!(
            detect_kind(None, None).unwrap_err(),
            ExtractionError::unsupported("unknown")
        );
    }
}
