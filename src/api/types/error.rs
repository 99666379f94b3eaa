//! API error envelope

use axum::{
    extract::multipart::MultipartError,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::batch::BatchError;
use crate::domain::extraction::ExtractionError;
use crate::domain::rate_limit::RateLimitError;
use crate::domain::validation::{FieldError, ValidationError};
use crate::domain::DomainError;

/// Broad error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    InvalidRequestError,
    NotFoundError,
    ConflictError,
    RateLimitError,
    ServerError,
    ServiceUnavailableError,
}

impl std::fmt::Display for ApiErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequestError => write!(f, "invalid_request_error"),
            Self::NotFoundError => write!(f, "not_found_error"),
            Self::ConflictError => write!(f, "conflict_error"),
            Self::RateLimitError => write!(f, "rate_limit_error"),
            Self::ServerError => write!(f, "server_error"),
            Self::ServiceUnavailableError => write!(f, "service_unavailable_error"),
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// Error detail structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: ApiErrorType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Seconds until a rate-limited client may retry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(
        status: StatusCode,
        error_type: ApiErrorType,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: ApiErrorDetail {
                    message: message.into(),
                    error_type,
                    param: None,
                    code: None,
                    retry_after: None,
                },
            },
        }
    }

    /// Add parameter info
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.response.error.param = Some(param.into());
        self
    }

    /// Add error code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.response.error.code = Some(code.into());
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiErrorType::InvalidRequestError, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiErrorType::NotFoundError, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, ApiErrorType::ConflictError, message)
    }

    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            ApiErrorType::InvalidRequestError,
            message,
        )
    }

    pub fn unsupported_media_type(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiErrorType::InvalidRequestError,
            message,
        )
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            ApiErrorType::InvalidRequestError,
            message,
        )
    }

    /// 429 carrying `retry_after` in the body and a `Retry-After` header
    pub fn rate_limited(retry_after_seconds: u64) -> Self {
        let mut err = Self::new(
            StatusCode::TOO_MANY_REQUESTS,
            ApiErrorType::RateLimitError,
            format!(
                "Rate limit exceeded. Try again in {} seconds.",
                retry_after_seconds
            ),
        )
        .with_code("rate_limited");
        err.response.error.retry_after = Some(retry_after_seconds);
        err
    }

    /// Map a multipart read failure; bodies over the size limit become 413 `too_large`
    pub fn multipart(context: &str, err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return Self::payload_too_large(format!(
                "{}: request body exceeds the upload limit",
                context
            ))
            .with_code("too_large");
        }
        Self::bad_request(format!("{}: {}", context, err.body_text()))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, ApiErrorType::ServerError, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            ApiErrorType::ServiceUnavailableError,
            message,
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let retry_after = self.response.error.retry_after;
        let mut response = (self.status, Json(self.response)).into_response();

        if let Some(seconds) = retry_after {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(seconds));
        }

        response
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::Validation { message } => {
                Self::bad_request(message).with_code("invalid_request")
            }
            DomainError::Provider { provider, message } => {
                Self::unavailable(format!("{}: {}", provider, message)).with_code("provider_error")
            }
            DomainError::Configuration { message } => {
                Self::internal(message).with_code("configuration_error")
            }
            DomainError::Storage { message } => Self::internal(message).with_code("storage_error"),
            DomainError::Internal { message } => Self::internal(message),
        }
    }
}

impl From<ExtractionError> for ApiError {
    fn from(err: ExtractionError) -> Self {
        let api_err = match err {
            ExtractionError::UnsupportedFormat { .. } => {
                Self::unsupported_media_type(err.to_string())
            }
            _ => Self::unprocessable(err.to_string()),
        };
        api_err.with_code(err.code())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        let api_err = match err {
            ValidationError::TooLarge { .. } => Self::payload_too_large(err.to_string()),
            _ => Self::bad_request(err.to_string()),
        };
        api_err.with_code(err.code())
    }
}

impl From<FieldError> for ApiError {
    fn from(err: FieldError) -> Self {
        let api_err = match &err {
            FieldError::Content {
                reason: ValidationError::TooLarge { .. },
                ..
            } => Self::payload_too_large(err.to_string()),
            _ => Self::bad_request(err.to_string()),
        };
        api_err.with_code(err.code()).with_param(err.field())
    }
}

impl From<RateLimitError> for ApiError {
    fn from(err: RateLimitError) -> Self {
        Self::rate_limited(err.retry_after_seconds())
    }
}

impl From<BatchError> for ApiError {
    fn from(err: BatchError) -> Self {
        let api_err = match err {
            BatchError::AlreadyRunning => Self::conflict(err.to_string()),
            BatchError::InputUnreadable { .. } => Self::internal(err.to_string()),
        };
        api_err.with_code(err.code())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.response.error.error_type, self.response.error.message
        )
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_with_param() {
        let err = ApiError::bad_request("Invalid value")
            .with_param("tone")
            .with_code("invalid_tone");

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.response.error.param, Some("tone".to_string()));
        assert_eq!(err.response.error.code, Some("invalid_tone".to_string()));
    }

    #[test]
    fn test_rate_limited_sets_header_and_body() {
        let response = ApiError::from(RateLimitError::Rejected(42)).into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "42");

        let err = ApiError::rate_limited(42);
        let json = serde_json::to_value(&err.response).unwrap();
        assert_eq!(json["error"]["retry_after"], 42);
        assert_eq!(json["error"]["type"], "rate_limit_error");
    }

    #[test]
    fn test_extraction_error_mapping() {
        let unsupported: ApiError = ExtractionError::unsupported(".csv").into();
        assert_eq!(unsupported.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(unsupported.response.error.code.as_deref(), Some("unsupported_format"));

        let corrupt: ApiError = ExtractionError::corrupt("pdf", "bad xref").into();
        assert_eq!(corrupt.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(corrupt.response.error.code.as_deref(), Some("corrupt_document"));
    }

    #[test]
    fn test_validation_error_mapping() {
        let too_large: ApiError = ValidationError::TooLarge {
            maximum: 10,
            actual: 11,
        }
        .into();
        assert_eq!(too_large.status, StatusCode::PAYLOAD_TOO_LARGE);

        let too_short: ApiError = ValidationError::TooShort {
            minimum: 100,
            actual: 3,
        }
        .into();
        assert_eq!(too_short.status, StatusCode::BAD_REQUEST);
        assert_eq!(too_short.response.error.code.as_deref(), Some("too_short"));
    }

    #[test]
    fn test_field_error_mapping() {
        let short: ApiError = FieldError::Content {
            field: "email_text".to_string(),
            reason: ValidationError::TooShort {
                minimum: 100,
                actual: 9,
            },
        }
        .into();
        assert_eq!(short.status, StatusCode::BAD_REQUEST);
        assert_eq!(short.response.error.code.as_deref(), Some("too_short"));
        assert_eq!(short.response.error.param.as_deref(), Some("email_text"));
        assert!(short.response.error.message.starts_with("email_text: "));

        let few: ApiError = FieldError::TooFewWords {
            field: "target_audience".to_string(),
            minimum: 10,
            actual: 4,
        }
        .into();
        assert_eq!(few.response.error.code.as_deref(), Some("too_few_words"));
        assert_eq!(few.response.error.param.as_deref(), Some("target_audience"));
    }

    #[test]
    fn test_batch_and_domain_mapping() {
        let busy: ApiError = BatchError::AlreadyRunning.into();
        assert_eq!(busy.status, StatusCode::CONFLICT);
        assert_eq!(busy.response.error.code.as_deref(), Some("batch_already_running"));

        let invalid: ApiError = DomainError::validation("bad input").into();
        assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
        assert_eq!(invalid.response.error.code.as_deref(), Some("invalid_request"));

        let provider: ApiError = DomainError::provider("openai", "timeout").into();
        assert_eq!(provider.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(provider.response.error.message, "openai: timeout");
    }
}
