//! Request rate limiting

pub mod window;

pub use window::{RateDecision, RateLimitConfig, RateLimitError, RateWindow};
