//! Email rewriting domain

pub mod prompt;
pub mod request;
pub mod rewriter;

pub use prompt::{render_rewrite_prompt, SYSTEM_PROMPT};
pub use request::{parse_focus_areas, RewriteOutcome, RewriteRequest, Tone};
pub use rewriter::EmailRewriter;

#[cfg(test)]
pub use rewriter::mock::MockEmailRewriter;
