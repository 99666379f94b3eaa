//! Email Rewriter API
//!
//! Rewrites email drafts for a target audience and tone through an LLM.
//! Drafts arrive as JSON, as uploaded `.txt`/`.pdf`/`.docx` files, or as
//! files dropped into a watched input folder.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use api::state::AppState;
use config::LlmConfig;
use domain::rewrite::EmailRewriter;
use domain::validation::ContentValidator;
use infrastructure::llm::{HttpClient, OpenAiProvider};
use infrastructure::rate_limit::FixedWindowRateLimiter;
use infrastructure::services::{LlmEmailRewriter, RewriteSettings};

/// Build the LLM-backed rewriter. A missing API key is not fatal here;
/// rewrites fail with a configuration error and `/health` reports degraded.
pub fn create_rewriter(config: &LlmConfig) -> anyhow::Result<Arc<dyn EmailRewriter>> {
    let api_key = config.resolve_api_key();
    if api_key.is_empty() {
        tracing::warn!(env = %config.api_key_env, "No LLM API key configured");
    }

    let client = HttpClient::with_timeout(config.timeout())?;
    let provider = OpenAiProvider::with_base_url(client, api_key, config.base_url.clone());

    let settings = RewriteSettings {
        model: config.model.clone(),
        max_tokens: config.max_tokens,
        temperature: config.temperature,
    };

    Ok(Arc::new(LlmEmailRewriter::new(Arc::new(provider), settings)))
}

/// Create application state from configuration
pub fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let rewriter = create_rewriter(&config.llm)?;
    let validator = ContentValidator::new(config.limits.validation_limits());

    let mut state = AppState::new(rewriter, config.folders.clone()).with_validator(validator);

    if config.rate_limit.enabled {
        let settings = &config.rate_limit;
        let limiter = FixedWindowRateLimiter::new(settings.window_config())
            .with_sweep_interval(Duration::from_secs(settings.sweep_interval_seconds))
            .with_max_tracked_keys(settings.max_tracked_keys);
        state = state.with_rate_limiter(limiter);
    }

    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_app_state_from_defaults() {
        let config = AppConfig::default();
        let state = create_app_state(&config).unwrap();

        assert!(state.rate_limiter.is_some());
        assert_eq!(state.rewriter.model(), "gpt-4");
        assert_eq!(state.validator.limits().email_min_chars, 100);
    }

    #[test]
    fn test_rate_limiter_can_be_disabled() {
        let mut config = AppConfig::default();
        config.rate_limit.enabled = false;

        let state = create_app_state(&config).unwrap();
        assert!(state.rate_limiter.is_none());
    }
}
