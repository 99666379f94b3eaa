mod app_config;

pub use app_config::{
    AppConfig, FoldersConfig, LimitsConfig, LlmConfig, LogFormat, LoggingConfig,
    RateLimitSettings, ServerConfig,
};
