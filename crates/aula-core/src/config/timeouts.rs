//! HTTP timeout configuration for engine calls

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timeouts applied by the shared HTTP client
///
/// The pipeline has no cancellation of its own; these are the only bounds on
/// how long an engine call may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Connection timeout in seconds
    pub connection_timeout_secs: u64,
    /// End-to-end request timeout in seconds
    pub request_timeout_secs: u64,
}

impl TimeoutConfig {
    /// Default connection timeout in seconds
    pub const DEFAULT_CONNECTION_SECS: u64 = 30;

    /// Default request timeout in seconds; generation of long plans is slow
    pub const DEFAULT_REQUEST_SECS: u64 = 120;

    pub fn new(connection_timeout_secs: u64, request_timeout_secs: u64) -> Self {
        Self {
            connection_timeout_secs,
            request_timeout_secs,
        }
    }

    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connection_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate timeout configuration
    ///
    /// Returns an error if:
    /// - Any timeout is zero
    /// - Request timeout is less than connection timeout
    pub fn validate(&self) -> Result<(), String> {
        if self.connection_timeout_secs == 0 {
            return Err("Connection timeout must be greater than 0".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("Request timeout must be greater than 0".to_string());
        }
        if self.request_timeout_secs < self.connection_timeout_secs {
            return Err(
                "Request timeout must be greater than or equal to connection timeout".to_string(),
            );
        }
        Ok(())
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CONNECTION_SECS, Self::DEFAULT_REQUEST_SECS)
    }
}
