//! Request, response and error types for the HTTP API

pub mod batch;
pub mod error;
pub mod json;
pub mod rewrite;

pub use batch::{
    FolderStatsResponse, ProcessFolderRequest, ProcessFolderResponse, SupportedFormat,
    SupportedFormatsResponse,
};
pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use json::Json;
pub use rewrite::{RewriteEmailRequest, RewriteEmailResponse, RewriteMetadata, ResponseStatus};
