//! Content validator: size ceilings and minimum-length thresholds

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default minimum characters for an email body
pub const DEFAULT_EMAIL_MIN_CHARS: usize = 100;
/// Default minimum characters for audience/context text
pub const DEFAULT_CONTEXT_MIN_CHARS: usize = 50;
/// Default raw upload ceiling (10 MiB)
pub const DEFAULT_MAX_BYTES: usize = 10 * 1024 * 1024;

/// What a piece of text is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentRole {
    Email,
    Context,
}

impl std::fmt::Display for ContentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Email => write!(f, "email"),
            Self::Context => write!(f, "context"),
        }
    }
}

/// Validation failure kinds
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("Text is empty")]
    Empty,

    #[error("Text too short: {actual} characters (minimum {minimum})")]
    TooShort { minimum: usize, actual: usize },

    #[error("File size {actual} bytes exceeds maximum allowed size ({maximum} bytes)")]
    TooLarge { maximum: usize, actual: usize },
}

impl ValidationError {
    /// Machine-readable reason code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::TooShort { .. } => "too_short",
            Self::TooLarge { .. } => "too_large",
        }
    }
}

/// Outcome of validating one text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationVerdict {
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<ValidationError>,
    pub measured_length: usize,
}

impl ValidationVerdict {
    fn pass(measured_length: usize) -> Self {
        Self {
            passed: true,
            reason: None,
            measured_length,
        }
    }

    fn fail(reason: ValidationError, measured_length: usize) -> Self {
        Self {
            passed: false,
            reason: Some(reason),
            measured_length,
        }
    }

    /// Convert into a `Result`, keeping the failure reason
    pub fn into_result(self) -> Result<usize, ValidationError> {
        match self.reason {
            Some(reason) => Err(reason),
            None => Ok(self.measured_length),
        }
    }
}

/// Thresholds applied by the validator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationLimits {
    pub email_min_chars: usize,
    pub context_min_chars: usize,
    pub max_bytes: usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            email_min_chars: DEFAULT_EMAIL_MIN_CHARS,
            context_min_chars: DEFAULT_CONTEXT_MIN_CHARS,
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

impl ValidationLimits {
    pub fn min_chars(&self, role: ContentRole) -> usize {
        match role {
            ContentRole::Email => self.email_min_chars,
            ContentRole::Context => self.context_min_chars,
        }
    }
}

/// Enforces minimum lengths on extracted text and the raw size ceiling
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentValidator {
    limits: ValidationLimits,
}

impl ContentValidator {
    pub fn new(limits: ValidationLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &ValidationLimits {
        &self.limits
    }

    /// Validate text for a role. Length is counted in characters of the trimmed text.
    pub fn validate(&self, text: &str, role: ContentRole) -> ValidationVerdict {
        let trimmed = text.trim();
        let length = trimmed.chars().count();

        if length == 0 {
            return ValidationVerdict::fail(ValidationError::Empty, 0);
        }

        let minimum = self.limits.min_chars(role);
        if length < minimum {
            return ValidationVerdict::fail(
                ValidationError::TooShort {
                    minimum,
                    actual: length,
                },
                length,
            );
        }

        ValidationVerdict::pass(length)
    }

    /// Reject raw inputs above the byte ceiling; runs before extraction
    pub fn check_size(&self, byte_len: usize) -> Result<(), ValidationError> {
        if byte_len > self.limits.max_bytes {
            return Err(ValidationError::TooLarge {
                maximum: self.limits.max_bytes,
                actual: byte_len,
            });
        }

        Ok(())
    }
}
