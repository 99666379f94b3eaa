//! Document extractors for the supported upload formats

mod docx;
mod pdf;
mod registry;
mod text;

pub use docx::DocxExtractor;
pub use pdf::PdfExtractor;
pub use registry::{detect_kind, ExtractorRegistry};
pub use text::PlainTextExtractor;
