//! Domain layer - Core business logic and entities

pub mod batch;
pub mod error;
pub mod extraction;
pub mod llm;
pub mod prompt;
pub mod rate_limit;
pub mod rewrite;
pub mod usage;
pub mod validation;

pub use batch::{
    BatchError, BatchItemError, BatchItemOutcome, BatchItemStatus, BatchReport, DispatchItem,
    FileRelocator, ItemDispatcher,
};
pub use error::DomainError;
pub use extraction::{
    DocumentExtractor, DocumentKind, ExtractedDocument, ExtractionError, IngestRequest,
    TextEncoding,
};
pub use llm::{FinishReason, LlmProvider, LlmRequest, LlmResponse, Message, MessageRole, Usage};
pub use prompt::{PromptTemplate, TemplateError};
pub use rate_limit::{RateDecision, RateLimitConfig, RateLimitError, RateWindow};
pub use rewrite::{EmailRewriter, RewriteOutcome, RewriteRequest, Tone};
pub use usage::{ModelPricing, PriceTable};
pub use validation::{ContentRole, ContentValidator, ValidationError, ValidationLimits, ValidationVerdict};
