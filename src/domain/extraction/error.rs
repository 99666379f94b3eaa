//! Extraction failures

use serde::Serialize;
use thiserror::Error;

/// Why bytes could not be turned into text
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum ExtractionError {
    #[error("Could not decode text file with supported encodings")]
    UnreadableEncoding,

    #[error("Failed to parse {kind} document: {message}")]
    CorruptDocument { kind: String, message: String },

    #[error("No text could be extracted from the document")]
    NoTextFound,

    #[error("Unsupported file type: {extension}. Supported types: .txt, .pdf, .docx")]
    UnsupportedFormat { extension: String },
}

impl ExtractionError {
    pub fn corrupt(kind: impl std::fmt::Display, message: impl Into<String>) -> Self {
        Self::CorruptDocument {
            kind: kind.to_string(),
            message: message.into(),
        }
    }

    pub fn unsupported(extension: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            extension: extension.into(),
        }
    }

    /// Machine-readable reason code
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnreadableEncoding => "unreadable_encoding",
            Self::CorruptDocument { .. } => "corrupt_document",
            Self::NoTextFound => "no_text_found",
            Self::UnsupportedFormat { .. } => "unsupported_format",
        }
    }
}
