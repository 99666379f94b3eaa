use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::rate_limit::RateLimitConfig;
use crate::domain::validation::{
    ValidationLimits, DEFAULT_CONTEXT_MIN_CHARS, DEFAULT_EMAIL_MIN_CHARS, DEFAULT_MAX_BYTES,
};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub llm: LlmConfig,
    pub rate_limit: RateLimitSettings,
    pub folders: FoldersConfig,
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Chat-completions provider settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Inline key; takes precedence over `api_key_env` when set
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitSettings {
    pub enabled: bool,
    pub max_requests: u32,
    pub window_seconds: u64,
    pub sweep_interval_seconds: u64,
    pub max_tracked_keys: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FoldersConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub monitor_enabled: bool,
    pub monitor_interval_seconds: u64,
    /// Audience used for files picked up by the monitor
    pub monitor_target_audience: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_upload_bytes: usize,
    pub email_min_chars: usize,
    pub context_min_chars: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: crate::infrastructure::llm::DEFAULT_OPENAI_BASE_URL.to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            model: "gpt-4".to_string(),
            max_tokens: 2000,
            temperature: 0.7,
            timeout_seconds: 60,
        }
    }
}

impl LlmConfig {
    /// Resolve the API key, empty when none is configured
    pub fn resolve_api_key(&self) -> String {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .unwrap_or_default()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        let window = RateLimitConfig::default();
        Self {
            enabled: true,
            max_requests: window.max_requests,
            window_seconds: window.window_seconds,
            sweep_interval_seconds: 300,
            max_tracked_keys: 10_000,
        }
    }
}

impl RateLimitSettings {
    pub fn window_config(&self) -> RateLimitConfig {
        RateLimitConfig::new(self.max_requests, self.window_seconds)
    }

    /// Zero quotas or windows are rejected while limiting is enabled
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if !self.enabled {
            return Ok(());
        }
        if self.max_requests == 0 {
            return Err(config::ConfigError::Message(
                "rate_limit.max_requests must be greater than 0".to_string(),
            ));
        }
        if self.window_seconds == 0 {
            return Err(config::ConfigError::Message(
                "rate_limit.window_seconds must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for FoldersConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
            monitor_enabled: false,
            monitor_interval_seconds: 30,
            monitor_target_audience: "professional audience".to_string(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_BYTES,
            email_min_chars: DEFAULT_EMAIL_MIN_CHARS,
            context_min_chars: DEFAULT_CONTEXT_MIN_CHARS,
        }
    }
}

impl LimitsConfig {
    pub fn validation_limits(&self) -> ValidationLimits {
        ValidationLimits {
            email_min_chars: self.email_min_chars,
            context_min_chars: self.context_min_chars,
            max_bytes: self.max_upload_bytes,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            // Plain variables kept for existing deployments
            .set_override_option("llm.model", env_value("MODEL_NAME"))?
            .set_override_option("llm.max_tokens", env_value("MAX_TOKENS"))?
            .set_override_option("llm.temperature", env_value("TEMPERATURE"))?
            .build()?;

        let app_config: Self = config.try_deserialize()?;
        app_config.rate_limit.validate()?;
        Ok(app_config)
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
