//! Infrastructure services

mod rewrite_service;

pub use rewrite_service::{LlmEmailRewriter, RewriteSettings};
