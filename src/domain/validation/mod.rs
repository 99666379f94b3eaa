//! Content validation

pub mod content;
pub mod request;

pub use content::{
    ContentRole, ContentValidator, ValidationError, ValidationLimits, ValidationVerdict,
    DEFAULT_CONTEXT_MIN_CHARS, DEFAULT_EMAIL_MIN_CHARS, DEFAULT_MAX_BYTES,
};
pub use request::{strip_control_chars, validate_request_text, word_count, FieldError};
