//! Field rules for JSON rewrite requests

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::content::{ContentRole, ContentValidator, ValidationError};

/// Maximum characters accepted for an email body in a JSON request
pub const EMAIL_MAX_CHARS: usize = 5000;
/// Maximum characters accepted for the audience/context in a JSON request
pub const CONTEXT_MAX_CHARS: usize = 2000;
/// Minimum whitespace-separated words for request text fields
pub const MIN_WORDS: usize = 10;

/// Control characters other than tab, newline and carriage return
static CONTROL_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]").expect("valid regex"));

/// Remove control characters, keeping line structure
pub fn strip_control_chars(text: &str) -> String {
    CONTROL_CHARS.replace_all(text, "").into_owned()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn max_chars(role: ContentRole) -> usize {
    match role {
        ContentRole::Email => EMAIL_MAX_CHARS,
        ContentRole::Context => CONTEXT_MAX_CHARS,
    }
}

/// A request text field that broke one of its rules
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("{field}: {reason}")]
    Content {
        field: String,
        reason: ValidationError,
    },

    #[error("{field}: text too long: {actual} characters (maximum {maximum})")]
    TooLong {
        field: String,
        maximum: usize,
        actual: usize,
    },

    #[error("{field}: text must contain at least {minimum} words")]
    TooFewWords {
        field: String,
        minimum: usize,
        actual: usize,
    },
}

impl FieldError {
    pub fn field(&self) -> &str {
        match self {
            Self::Content { field, .. }
            | Self::TooLong { field, .. }
            | Self::TooFewWords { field, .. } => field,
        }
    }

    /// Machine-readable reason code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Content { reason, .. } => reason.code(),
            Self::TooLong { .. } => "too_long",
            Self::TooFewWords { .. } => "too_few_words",
        }
    }
}

/// Sanitize and validate one request text field, returning the cleaned text
pub fn validate_request_text(
    field: &str,
    text: &str,
    role: ContentRole,
    validator: &ContentValidator,
) -> Result<String, FieldError> {
    let cleaned = strip_control_chars(text);

    let length = validator
        .validate(&cleaned, role)
        .into_result()
        .map_err(|reason| FieldError::Content {
            field: field.to_string(),
            reason,
        })?;

    let maximum = max_chars(role);
    if length > maximum {
        return Err(FieldError::TooLong {
            field: field.to_string(),
            maximum,
            actual: length,
        });
    }

    let words = word_count(&cleaned);
    if words < MIN_WORDS {
        return Err(FieldError::TooFewWords {
            field: field.to_string(),
            minimum: MIN_WORDS,
            actual: words,
        });
    }

    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize, word: &str) -> String {
        vec![word; n].join(" ")
    }

    #[test]
    fn test_strip_control_chars_keeps_newlines() {
        let input = "Hello\u{0007} team,\r\n\tthanks\u{0000}!";
        assert_eq!(strip_control_chars(input), "Hello team,\r\n\tthanks!");
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("  one two\nthree\tfour "), 4);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn test_valid_email_field() {
        let validator = ContentValidator::default();
        let text = words(20, "meeting");

        let cleaned = validate_request_text("email_text", &text, ContentRole::Email, &validator)
            .unwrap();
        assert_eq!(cleaned, text);
    }

    #[test]
    fn test_too_short_email_field() {
        let validator = ContentValidator::default();
        let err = validate_request_text("email_text", "Hi there", ContentRole::Email, &validator)
            .unwrap_err();

        assert_eq!(err.field(), "email_text");
        assert_eq!(err.code(), "too_short");
        assert!(err.to_string().contains("too short"));
    }

    #[test]
    fn test_too_long_context_field() {
        let validator = ContentValidator::default();
        let text = words(500, "audience");

        let err = validate_request_text("target_audience", &text, ContentRole::Context, &validator)
            .unwrap_err();
        assert_eq!(err.code(), "too_long");
        assert!(err.to_string().contains("too long"));
    }

    #[test]
    fn test_too_few_words() {
        let validator = ContentValidator::default();
        let text = words(5, "supercalifragilisticexpialidocious");

        let err = validate_request_text("target_audience", &text, ContentRole::Context, &validator)
            .unwrap_err();
        assert_eq!(err.code(), "too_few_words");
        assert!(err.to_string().contains("at least 10 words"));
    }

    #[test]
    fn test_blank_field_is_empty() {
        let validator = ContentValidator::default();
        let err = validate_request_text("email_text", " \u{0007}\n ", ContentRole::Email, &validator)
            .unwrap_err();

        assert_eq!(err.code(), "empty");
    }
}
