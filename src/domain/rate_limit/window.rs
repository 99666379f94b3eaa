//! Fixed-window counter and admission decisions

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rate limiting configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum admitted requests per window
    pub max_requests: u32,
    /// Window length in seconds
    pub window_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window_seconds: 60,
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_seconds: u64) -> Self {
        Self {
            max_requests,
            window_seconds,
        }
    }

    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_seconds)
    }
}

/// Result of an admission check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum RateDecision {
    Admitted {
        remaining: u32,
        reset_in_seconds: u64,
    },
    Rejected {
        retry_after_seconds: u64,
    },
}

impl RateDecision {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::Admitted { .. })
    }

    /// `(remaining, reset_in_seconds)` when admitted; rejections become errors
    pub fn into_result(self) -> Result<(u32, u64), RateLimitError> {
        match self {
            Self::Admitted {
                remaining,
                reset_in_seconds,
            } => Ok((remaining, reset_in_seconds)),
            Self::Rejected {
                retry_after_seconds,
            } => Err(RateLimitError::Rejected(retry_after_seconds)),
        }
    }
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum RateLimitError {
    #[error("Rate limit exceeded, retry after {0} seconds")]
    Rejected(u64),
}

impl RateLimitError {
    pub fn retry_after_seconds(&self) -> u64 {
        match self {
            Self::Rejected(seconds) => *seconds,
        }
    }
}

/// Per-client window state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateWindow {
    pub client_key: String,
    pub window_start: Instant,
    pub count: u32,
}

impl RateWindow {
    /// Open a window holding the first request
    pub fn open(client_key: impl Into<String>, now: Instant) -> Self {
        Self {
            client_key: client_key.into(),
            window_start: now,
            count: 1,
        }
    }

    pub fn is_expired(&self, now: Instant, config: &RateLimitConfig) -> bool {
        now.saturating_duration_since(self.window_start) >= config.window()
    }

    /// Count one request against this window and decide on it.
    ///
    /// An expired window restarts at `now` and admits. Rejected requests still count.
    pub fn hit(&mut self, now: Instant, config: &RateLimitConfig) -> RateDecision {
        if self.is_expired(now, config) {
            self.window_start = now;
            self.count = 1;
            return Self::opening_decision(config);
        }

        self.count = self.count.saturating_add(1);
        self.decide(now, config)
    }

    /// The request that opens a window is always admitted
    pub fn opening_decision(config: &RateLimitConfig) -> RateDecision {
        RateDecision::Admitted {
            remaining: config.max_requests.saturating_sub(1),
            reset_in_seconds: config.window_seconds,
        }
    }

    /// Decision for the current count without mutating the window
    pub fn decide(&self, now: Instant, config: &RateLimitConfig) -> RateDecision {
        let elapsed = now.saturating_duration_since(self.window_start);
        let left = config.window().saturating_sub(elapsed);

        if self.count <= config.max_requests {
            RateDecision::Admitted {
                remaining: config.max_requests - self.count,
                reset_in_seconds: ceil_seconds(left),
            }
        } else {
            RateDecision::Rejected {
                retry_after_seconds: ceil_seconds(left).max(1),
            }
        }
    }
}

fn ceil_seconds(duration: Duration) -> u64 {
    let secs = duration.as_secs();
    if duration.subsec_nanos() > 0 {
        secs + 1
    } else {
        secs
    }
}
