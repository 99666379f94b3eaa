//! Declared document kinds and detection helpers

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Kind of document an ingest request declares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Text,
    Pdf,
    Docx,
}

impl DocumentKind {
    /// All kinds accepted by the service, in listing order
    pub const ALL: [DocumentKind; 3] = [Self::Text, Self::Pdf, Self::Docx];

    /// Canonical file extension (with leading dot)
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Text => ".txt",
            Self::Pdf => ".pdf",
            Self::Docx => ".docx",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Text => "text/plain",
            Self::Pdf => "application/pdf",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Text => "Plain text files",
            Self::Pdf => "PDF documents",
            Self::Docx => "Microsoft Word documents",
        }
    }

    /// Detect the kind from a filename extension (case-insensitive)
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = Path::new(filename).extension()?.to_str()?.to_lowercase();
        Self::from_extension(&ext)
    }

    /// Detect the kind from a bare extension, with or without the leading dot
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "txt" => Some(Self::Text),
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    /// Detect the kind from a MIME type, ignoring parameters such as charset
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim().to_lowercase();

        Self::ALL.into_iter().find(|kind| kind.mime_type() == essence)
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Pdf => write!(f, "pdf"),
            Self::Docx => write!(f, "docx"),
        }
    }
}

/// Lowercased extension of a path including the dot, or an empty string
pub fn extension_of(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default()
}

/// Whether the filename carries a supported extension
pub fn is_supported_filename(filename: &str) -> bool {
    DocumentKind::from_filename(filename).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_filename() {
        assert_eq!(DocumentKind::from_filename("mail.txt"), Some(DocumentKind::Text));
        assert_eq!(DocumentKind::from_filename("MAIL.TXT"), Some(DocumentKind::Text));
        assert_eq!(DocumentKind::from_filename("scan.pdf"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_filename("letter.docx"), Some(DocumentKind::Docx));
        assert_eq!(DocumentKind::from_filename("data.csv"), None);
        assert_eq!(DocumentKind::from_filename("noextension"), None);
        assert_eq!(DocumentKind::from_filename("legacy.doc"), None);
    }

    #[test]
    fn test_from_mime() {
        assert_eq!(
            DocumentKind::from_mime("text/plain; charset=utf-8"),
            Some(DocumentKind::Text)
        );
        assert_eq!(DocumentKind::from_mime("application/pdf"), Some(DocumentKind::Pdf));
        assert_eq!(
            DocumentKind::from_mime(
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            ),
            Some(DocumentKind::Docx)
        );
        assert_eq!(DocumentKind::from_mime("text/html"), None);
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("notes.CSV"), ".csv");
        assert_eq!(extension_of("README"), "");
    }

    #[test]
    fn test_kind_serialization() {
        assert_eq!(serde_json::to_string(&DocumentKind::Docx).unwrap(), "\"docx\"");
    }
}
