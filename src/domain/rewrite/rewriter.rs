use async_trait::async_trait;
use std::fmt::Debug;

use super::{RewriteOutcome, RewriteRequest};
use crate::domain::DomainError;

/// Produces a rewritten email for a request
#[async_trait]
pub trait EmailRewriter: Send + Sync + Debug {
    async fn rewrite(&self, request: RewriteRequest) -> Result<RewriteOutcome, DomainError>;

    /// Model name reported in responses
    fn model(&self) -> &str;

    fn is_configured(&self) -> bool;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::domain::llm::Usage;
    use std::sync::Mutex;

    /// Rewriter returning a fixed reply
    #[derive(Debug)]
    pub struct MockEmailRewriter {
        reply: Option<String>,
        error: Option<String>,
        requests: Mutex<Vec<RewriteRequest>>,
    }

    impl MockEmailRewriter {
        pub fn new() -> Self {
            Self {
                reply: Some("Dear team,\n\nRewritten.\n\nBest regards".to_string()),
                error: None,
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn with_reply(mut self, reply: impl Into<String>) -> Self {
            self.reply = Some(reply.into());
            self
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        pub fn requests(&self) -> Vec<RewriteRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EmailRewriter for MockEmailRewriter {
        async fn rewrite(&self, request: RewriteRequest) -> Result<RewriteOutcome, DomainError> {
            self.requests.lock().unwrap().push(request);

            if let Some(ref error) = self.error {
                return Err(DomainError::provider("mock", error));
            }

            Ok(RewriteOutcome {
                content: self.reply.clone().unwrap_or_default(),
                model: "gpt-4".to_string(),
                usage: Usage::new(150, 50),
                cost_usd: 0.0075,
            })
        }

        fn model(&self) -> &str {
            "gpt-4"
        }

        fn is_configured(&self) -> bool {
            true
        }
    }
}
