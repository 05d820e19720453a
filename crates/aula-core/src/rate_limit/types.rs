//! Rate limit configuration and outcome types

use std::time::Duration;

/// Window configuration for one operation class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Requests admitted per window
    pub max_requests: u32,
    /// Window length
    pub window: Duration,
}

impl RateLimitConfig {
    pub const fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
        }
    }

    /// Convenience constructor for millisecond windows
    pub const fn from_millis(max_requests: u32, window_ms: u64) -> Self {
        Self::new(max_requests, Duration::from_millis(window_ms))
    }
}

/// Predefined operation classes
///
/// Limits are product policy: 30/hour for text generation, 10/hour for image
/// generation, 10 per 15 minutes for authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationClass {
    AiGeneration,
    AiImage,
    Auth,
}

impl OperationClass {
    /// Key prefix for this class
    pub fn prefix(&self) -> &'static str {
        match self {
            OperationClass::AiGeneration => "AI_GENERATION",
            OperationClass::AiImage => "AI_IMAGE",
            OperationClass::Auth => "AUTH",
        }
    }

    pub fn config(&self) -> RateLimitConfig {
        match self {
            OperationClass::AiGeneration => RateLimitConfig::from_millis(30, 3_600_000),
            OperationClass::AiImage => RateLimitConfig::from_millis(10, 3_600_000),
            OperationClass::Auth => RateLimitConfig::from_millis(10, 900_000),
        }
    }
}

impl std::fmt::Display for OperationClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Result of a single admission check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitOutcome {
    /// Whether the request is admitted
    pub success: bool,
    /// Requests left in the current window
    pub remaining: u32,
    /// Configured limit
    pub limit: u32,
    /// Time until the window resets, within `[0, window]`
    pub reset: Duration,
}

impl RateLimitOutcome {
    /// `Retry-After` value in whole seconds, rounded up
    pub fn retry_after_secs(&self) -> u64 {
        let millis = self.reset.as_millis() as u64;
        millis.div_ceil(1000)
    }
}
