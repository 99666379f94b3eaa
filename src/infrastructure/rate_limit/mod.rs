//! Rate limiting infrastructure

mod fixed_window;

pub use fixed_window::FixedWindowRateLimiter;
