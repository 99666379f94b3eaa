//! Extractor trait

use std::fmt::Debug;

use super::document::ExtractedDocument;
use super::error::ExtractionError;
use super::kind::DocumentKind;

/// Turns the raw bytes of one document kind into text
///
/// Implementations are pure and synchronous; callers on an async path run
/// them under `spawn_blocking`.
pub trait DocumentExtractor: Send + Sync + Debug {
    /// Kind of document this extractor handles
    fn kind(&self) -> DocumentKind;

    /// Extract text from the raw bytes
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedDocument, ExtractionError>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}
