//! Per-caller request admission for pipeline entry points
//!
//! Implements a fixed-window counter keyed by caller identity and operation
//! class. The limiter only reports; turning a rejection into an HTTP 429 is
//! done by [`http::enforce`].

pub mod http;
mod types;
mod window;


pub use http::{caller_identity, enforce, rate_limit_key};
pub use types::{OperationClass, RateLimitConfig, RateLimitOutcome};
pub use window::SlidingWindowLimiter;
