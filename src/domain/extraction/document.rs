//! Ingest input and extraction result types

use serde::{Deserialize, Serialize};

use super::kind::DocumentKind;

/// Raw bytes plus the kind they were declared as
#[derive(Debug, Clone)]
pub struct IngestRequest {
    bytes: Vec<u8>,
    kind: DocumentKind,
    file_name: Option<String>,
}

impl IngestRequest {
    pub fn new(bytes: impl Into<Vec<u8>>, kind: DocumentKind) -> Self {
        Self {
            bytes: bytes.into(),
            kind,
            file_name: None,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }
}

/// Character encodings tried for plain text, in fallback order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextEncoding {
    #[serde(rename = "utf-8")]
    Utf8,
    #[serde(rename = "utf-16")]
    Utf16,
    #[serde(rename = "latin-1")]
    Latin1,
    #[serde(rename = "cp1252")]
    Cp1252,
}

impl TextEncoding {
    /// Default fallback sequence for plain text
    pub const FALLBACK_ORDER: [TextEncoding; 4] =
        [Self::Utf8, Self::Utf16, Self::Latin1, Self::Cp1252];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Utf16 => "utf-16",
            Self::Latin1 => "latin-1",
            Self::Cp1252 => "cp1252",
        }
    }
}

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Decoded text of a successfully extracted document
///
/// `text` is trimmed and never empty; constructors that would violate this
/// live in the extractors, which return `NoTextFound` instead.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedDocument {
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    encoding: Option<TextEncoding>,
    kind: DocumentKind,
}

impl ExtractedDocument {
    /// Returns `None` when the trimmed text is empty
    pub fn new(text: impl Into<String>, kind: DocumentKind) -> Option<Self> {
        let text = text.into();
        let trimmed = text.trim();

        if trimmed.is_empty() {
            return None;
        }

        Some(Self {
            text: trimmed.to_string(),
            encoding: None,
            kind,
        })
    }

    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    pub fn encoding(&self) -> Option<TextEncoding> {
        self.encoding
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_request_accessors() {
        let request = IngestRequest::new(b"hello".to_vec(), DocumentKind::Text)
            .with_file_name("hello.txt");

        assert_eq!(request.byte_len(), 5);
        assert_eq!(request.kind(), DocumentKind::Text);
        assert_eq!(request.file_name(), Some("hello.txt"));
    }

    #[test]
    fn test_extracted_document_rejects_blank_text() {
        assert!(ExtractedDocument::new("  \n\t ", DocumentKind::Text).is_none());
    }

    #[test]
    fn test_extracted_document_trims() {
        let doc = ExtractedDocument::new("  Dear team,\n", DocumentKind::Docx).unwrap();
        assert_eq!(doc.text(), "Dear team,");
        assert_eq!(doc.encoding(), None);
    }

    #[test]
    fn test_encoding_labels() {
        assert_eq!(TextEncoding::Utf16.to_string(), "utf-16");
        assert_eq!(
            serde_json::to_string(&TextEncoding::Latin1).unwrap(),
            "\"latin-1\""
        );
    }
}
