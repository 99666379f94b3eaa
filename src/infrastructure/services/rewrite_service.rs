//! Rewrite service - renders the prompt, calls the provider, prices the usage

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::rewrite::{render_rewrite_prompt, SYSTEM_PROMPT};
use crate::domain::{
    DomainError, EmailRewriter, LlmProvider, LlmRequest, PriceTable, RewriteOutcome, RewriteRequest,
};

/// Generation parameters for rewrites
#[derive(Debug, Clone)]
pub struct RewriteSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for RewriteSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4".to_string(),
            max_tokens: 2000,
            temperature: 0.7,
        }
    }
}

/// `EmailRewriter` backed by an LLM provider
#[derive(Debug)]
pub struct LlmEmailRewriter {
    provider: Arc<dyn LlmProvider>,
    settings: RewriteSettings,
    pricing: PriceTable,
}

impl LlmEmailRewriter {
    pub fn new(provider: Arc<dyn LlmProvider>, settings: RewriteSettings) -> Self {
        Self {
            provider,
            settings,
            pricing: PriceTable::default(),
        }
    }

    pub fn with_pricing(mut self, pricing: PriceTable) -> Self {
        self.pricing = pricing;
        self
    }
}

#[async_trait]
impl EmailRewriter for LlmEmailRewriter {
    async fn rewrite(&self, request: RewriteRequest) -> Result<RewriteOutcome, DomainError> {
        let user_prompt = render_rewrite_prompt(&request)
            .map_err(|e| DomainError::internal(format!("Failed to render prompt: {}", e)))?;

        let llm_request = LlmRequest::builder()
            .system(SYSTEM_PROMPT)
            .user(user_prompt)
            .temperature(self.settings.temperature)
            .max_tokens(self.settings.max_tokens)
            .build();

        debug!(
            model = %self.settings.model,
            tone = %request.tone,
            provider = self.provider.provider_name(),
            "Sending rewrite request"
        );

        let response = self.provider.chat(&self.settings.model, llm_request).await?;
        let usage = response.usage.unwrap_or_default();
        let cost_usd = self.pricing.estimate(&self.settings.model, &usage);

        info!(
            model = %self.settings.model,
            total_tokens = usage.total_tokens,
            cost_usd,
            "Email rewritten"
        );

        Ok(RewriteOutcome {
            content: response.content().to_string(),
            model: self.settings.model.clone(),
            usage,
            cost_usd,
        })
    }

    fn model(&self) -> &str {
        &self.settings.model
    }

    fn is_configured(&self) -> bool {
        self.provider.is_configured()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::MockLlmProvider;
    use crate::domain::{LlmResponse, Message, MessageRole, Tone, Usage};

    fn provider_with_reply(reply: &str) -> Arc<MockLlmProvider> {
        Arc::new(MockLlmProvider::new("mock").with_response(
            LlmResponse::new("id-1", "gpt-4-0613", Message::assistant(reply))
                .with_usage(Usage::new(1000, 500)),
        ))
    }

    #[tokio::test]
    async fn test_rewrite_prices_usage_for_configured_model() {
        let provider = provider_with_reply("Dear team,\n\nPlease find the report attached.");
        let rewriter = LlmEmailRewriter::new(provider.clone(), RewriteSettings::default());

        let request = RewriteRequest::new("send report", "Executives").with_tone(Tone::Academic);
        let outcome = rewriter.rewrite(request).await.unwrap();

        assert_eq!(outcome.content, "Dear team,\n\nPlease find the report attached.");
        assert_eq!(outcome.model, "gpt-4");
        assert_eq!(outcome.usage.total_tokens, 1500);
        // gpt-4: 1000 * 0.03/1K + 500 * 0.06/1K
        assert!((outcome.cost_usd - 0.06).abs() < 1e-9);

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        let (model, sent) = &requests[0];
        assert_eq!(model, "gpt-4");
        assert_eq!(sent.messages[0].role, MessageRole::System);
        assert!(sent.messages[1].content.contains("Academic tone"));
        assert_eq!(sent.max_tokens, Some(2000));
        assert_eq!(sent.temperature, Some(0.7));
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let provider = Arc::new(MockLlmProvider::new("mock").with_error("rate limited upstream"));
        let rewriter = LlmEmailRewriter::new(provider, RewriteSettings::default());

        let err = rewriter
            .rewrite(RewriteRequest::new("email", "audience"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Provider { .. }));
    }
}
