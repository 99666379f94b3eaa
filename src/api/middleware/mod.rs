//! API middleware components

pub mod logging;
pub mod rate_limit;
pub mod security;

pub use logging::{logging_middleware, RequestId, REQUEST_ID_HEADER};
pub use rate_limit::{client_key, rate_limit_middleware};
pub use security::{request_body_limit, security_headers_middleware};
