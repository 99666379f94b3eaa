//! Document extraction domain types and traits
//!
//! This module provides:
//! - `DocumentKind` and filename/MIME detection
//! - `IngestRequest` / `ExtractedDocument` pipeline values
//! - `DocumentExtractor` trait implemented per document kind

pub mod document;
pub mod error;
pub mod extractor;
pub mod kind;

pub use document::{ExtractedDocument, IngestRequest, TextEncoding};
pub use error::ExtractionError;
pub use extractor::DocumentExtractor;
pub use kind::{extension_of, is_supported_filename, DocumentKind};

#[cfg(test)]
pub use extractor::mock::MockDocumentExtractor;
