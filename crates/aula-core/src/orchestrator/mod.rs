//! Generation orchestration
//!
//! Anonymizes a request, dispatches it to one engine or an ordered chain of
//! engines, restores names in the answer and optionally runs the result
//! through a bounded validate-retry loop.

mod fallback;
mod json;
mod pipeline;
mod request;
mod retry;

pub use fallback::first_available;
pub use json::parse_json_response;
pub use pipeline::Orchestrator;
pub use request::{EngineSelection, GenerationRequest};
pub use retry::{DEFAULT_MAX_RETRIES, RetryOutcome, RetryState, generate_with_retry};
