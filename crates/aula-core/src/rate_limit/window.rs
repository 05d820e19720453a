//! Fixed-window counter store

use super::types::{RateLimitConfig, RateLimitOutcome};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Counter state for one key
#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    started_at: Instant,
    period: Duration,
}

impl Window {
    fn new(now: Instant, period: Duration) -> Self {
        Self {
            count: 0,
            started_at: now,
            period,
        }
    }

    fn is_expired(&self, now: Instant, period: Duration) -> bool {
        now.saturating_duration_since(self.started_at) >= period
    }
}

/// In-memory window store keyed by `"{class}:{caller}"`
///
/// Cloning shares the underlying map. Each key's check-then-increment runs
/// under that key's shard lock, so concurrent callers on a multi-threaded
/// runtime never lose an increment.
#[derive(Debug, Clone, Default)]
pub struct SlidingWindowLimiter {
    windows: Arc<DashMap<String, Window>>,
}

impl SlidingWindowLimiter {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Check and count a request for `key` now
    pub fn check(&self, key: &str, config: RateLimitConfig) -> RateLimitOutcome {
        self.check_at(key, config, Instant::now())
    }

    /// Check and count a request for `key` at an explicit instant
    pub fn check_at(&self, key: &str, config: RateLimitConfig, now: Instant) -> RateLimitOutcome {
        let mut entry = self
            .windows
            .entry(key.to_string())
            .or_insert_with(|| Window::new(now, config.window));

        let window = entry.value_mut();
        if window.is_expired(now, config.window) {
            *window = Window::new(now, config.window);
        }
        window.period = config.window;
        window.count = window.count.saturating_add(1);

        let elapsed = now.saturating_duration_since(window.started_at);
        let reset = config.window.saturating_sub(elapsed).min(config.window);
        let outcome = RateLimitOutcome {
            success: window.count <= config.max_requests,
            remaining: config.max_requests.saturating_sub(window.count),
            limit: config.max_requests,
            reset,
        };
        drop(entry);

        if outcome.success {
            debug!(key, remaining = outcome.remaining, "rate limit check passed");
        } else {
            warn!(
                key,
                reset_ms = outcome.reset.as_millis() as u64,
                "rate limit exceeded"
            );
        }
        outcome
    }

    /// Drop windows whose period has elapsed
    ///
    /// Expiry is already logical on the next check; this only bounds memory.
    pub fn purge_expired(&self, now: Instant) -> usize {
        let before = self.windows.len();
        self.windows
            .retain(|_, window| !window.is_expired(now, window.period));
        before.saturating_sub(self.windows.len())
    }

    /// Number of tracked keys
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}
