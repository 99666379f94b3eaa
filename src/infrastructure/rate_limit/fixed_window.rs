//! Rate limiter implementation
//!
//! Provides fixed-window rate limiting keyed by client identity.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::domain::rate_limit::{RateDecision, RateLimitConfig, RateWindow};

const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(300);
const DEFAULT_MAX_TRACKED_KEYS: usize = 10_000;

#[derive(Debug)]
struct LimiterState {
    windows: HashMap<String, RateWindow>,
    last_sweep: Instant,
}

/// Per-client fixed-window limiter. Every check takes the table lock once.
#[derive(Debug)]
pub struct FixedWindowRateLimiter {
    config: RateLimitConfig,
    sweep_interval: Duration,
    max_tracked_keys: usize,
    state: Mutex<LimiterState>,
}

impl FixedWindowRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            max_tracked_keys: DEFAULT_MAX_TRACKED_KEYS,
            state: Mutex::new(LimiterState {
                windows: HashMap::new(),
                last_sweep: Instant::now(),
            }),
        }
    }

    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    pub fn with_max_tracked_keys(mut self, max: usize) -> Self {
        self.max_tracked_keys = max.max(1);
        self
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Count a request for `client_key` at `now` and decide whether to admit it
    pub async fn admit(&self, client_key: &str, now: Instant) -> RateDecision {
        let mut state = self.state.lock().await;

        if now.saturating_duration_since(state.last_sweep) >= self.sweep_interval {
            Self::sweep(&mut state.windows, now, &self.config);
            state.last_sweep = now;
        }

        if let Some(window) = state.windows.get_mut(client_key) {
            return window.hit(now, &self.config);
        }

        if state.windows.len() >= self.max_tracked_keys {
            Self::sweep(&mut state.windows, now, &self.config);
            state.last_sweep = now;

            if state.windows.len() >= self.max_tracked_keys {
                Self::evict_oldest(&mut state.windows);
            }
        }

        state
            .windows
            .insert(client_key.to_string(), RateWindow::open(client_key, now));

        RateWindow::opening_decision(&self.config)
    }

    /// Forget a client's window
    pub async fn reset(&self, client_key: &str) {
        self.state.lock().await.windows.remove(client_key);
    }

    pub async fn tracked_keys(&self) -> usize {
        self.state.lock().await.windows.len()
    }

    fn sweep(windows: &mut HashMap<String, RateWindow>, now: Instant, config: &RateLimitConfig) {
        let before = windows.len();
        windows.retain(|_, w| !w.is_expired(now, config));

        let removed = before - windows.len();
        if removed > 0 {
            tracing::debug!(removed, remaining = windows.len(), "Swept expired rate windows");
        }
    }

    fn evict_oldest(windows: &mut HashMap<String, RateWindow>) {
        let oldest = windows
            .values()
            .min_by_key(|w| w.window_start)
            .map(|w| w.client_key.clone());

        if let Some(key) = oldest {
            windows.remove(&key);
            tracing::warn!(client_key = %key, "Rate limiter at capacity, evicted oldest window");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max_requests: u32, window_seconds: u64) -> FixedWindowRateLimiter {
        FixedWindowRateLimiter::new(RateLimitConfig::new(max_requests, window_seconds))
    }

    #[tokio::test]
    async fn test_first_request_admits_even_without_quota() {
        let limiter = limiter(0, 60);
        let now = Instant::now();

        assert!(limiter.admit("new-client", now).await.is_admitted());
        assert_eq!(
            limiter.admit("new-client", now).await,
            RateDecision::Rejected {
                retry_after_seconds: 60
            }
        );
    }

    #[tokio::test]
    async fn test_first_request_admits() {
        let limiter = limiter(10, 60);

        let decision = limiter.admit("10.0.0.1", Instant::now()).await;
        assert_eq!(
            decision,
            RateDecision::Admitted {
                remaining: 9,
                reset_in_seconds: 60
            }
        );
    }

    #[tokio::test]
    async fn test_ten_admits_then_reject_then_fresh_window() {
        let limiter = limiter(10, 60);
        let start = Instant::now();

        for i in 0..10 {
            let decision = limiter.admit("client", start + Duration::from_secs(i)).await;
            assert!(decision.is_admitted(), "request {} should be admitted", i + 1);
        }

        let decision = limiter.admit("client", start + Duration::from_secs(10)).await;
        match decision {
            RateDecision::Rejected {
                retry_after_seconds,
            } => assert_eq!(retry_after_seconds, 50),
            other => panic!("expected rejection, got {:?}", other),
        }

        let decision = limiter.admit("client", start + Duration::from_secs(61)).await;
        assert_eq!(
            decision,
            RateDecision::Admitted {
                remaining: 9,
                reset_in_seconds: 60
            }
        );
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let limiter = limiter(1, 60);
        let now = Instant::now();

        assert!(limiter.admit("a", now).await.is_admitted());
        assert!(!limiter.admit("a", now).await.is_admitted());
        assert!(limiter.admit("b", now).await.is_admitted());
    }

    #[tokio::test]
    async fn test_reset() {
        let limiter = limiter(1, 60);
        let now = Instant::now();

        limiter.admit("a", now).await;
        assert!(!limiter.admit("a", now).await.is_admitted());

        limiter.reset("a").await;
        assert!(limiter.admit("a", now).await.is_admitted());
    }

    #[tokio::test]
    async fn test_periodic_sweep_drops_expired_windows() {
        let limiter = limiter(5, 60).with_sweep_interval(Duration::from_secs(120));
        let start = Instant::now();

        limiter.admit("a", start).await;
        limiter.admit("b", start).await;
        assert_eq!(limiter.tracked_keys().await, 2);

        limiter.admit("c", start + Duration::from_secs(600)).await;
        assert_eq!(limiter.tracked_keys().await, 1);
    }

    #[tokio::test]
    async fn test_capacity_evicts_oldest_live_window() {
        let limiter = limiter(5, 60).with_max_tracked_keys(2);
        let start = Instant::now();

        limiter.admit("oldest", start).await;
        limiter.admit("newer", start + Duration::from_secs(1)).await;
        limiter.admit("newest", start + Duration::from_secs(2)).await;

        assert_eq!(limiter.tracked_keys().await, 2);

        // "oldest" was evicted, so it starts over with a full allowance
        let decision = limiter.admit("oldest", start + Duration::from_secs(3)).await;
        assert_eq!(
            decision,
            RateDecision::Admitted {
                remaining: 4,
                reset_in_seconds: 60
            }
        );
    }

    #[tokio::test]
    async fn test_capacity_prefers_sweeping_expired() {
        let limiter = limiter(5, 60).with_max_tracked_keys(2);
        let start = Instant::now();

        limiter.admit("stale", start).await;
        limiter.admit("live", start + Duration::from_secs(50)).await;
        limiter.admit("new", start + Duration::from_secs(70)).await;

        // "stale" expired and was swept, "live" survived
        limiter.admit("live", start + Duration::from_secs(71)).await;
        assert_eq!(limiter.tracked_keys().await, 2);
        let decision = limiter.admit("live", start + Duration::from_secs(72)).await;
        assert_eq!(
            decision,
            RateDecision::Admitted {
                remaining: 2,
                reset_in_seconds: 38
            }
        );
    }
}
