//! Aula Core Library
//!
//! This crate provides the AI generation pipeline behind Aula workspaces:
//! per-caller rate limiting, reversible anonymization of student names,
//! routing across five LLM engines, ordered fallback and validated retries.

pub mod anonymize;
pub mod config;
pub mod engine;
pub mod error;
pub mod llm;
pub mod orchestrator;
pub mod rate_limit;
pub mod usage;
pub mod validation;

// Re-export commonly used types
pub use anonymize::{AnonymizationContext, Anonymized, Restorer, anonymize};
pub use config::{EnvSource, PipelineConfig, TimeoutConfig};
pub use engine::{CredentialResolver, EngineId, EngineRouter, TextGenerator, select_vision_engine};
pub use error::{AulaError, AulaResult};
pub use llm::{GenerationOptions, LlmMessage, MessageRole};
pub use orchestrator::{
    EngineSelection, GenerationRequest, Orchestrator, RetryOutcome, generate_with_retry,
};
pub use rate_limit::{OperationClass, RateLimitOutcome, SlidingWindowLimiter};
pub use usage::{UsageEvent, UsageSink, UsageTracker};
pub use validation::{DiagnosticValidator, Profile, ValidationResult, calculate_metrics};
