//! Validation of generated content
//!
//! [`ValidationResult`] is the contract between a validator and the
//! validate-retry loop. The diagnostic validator is the concrete rule set
//! for diagnostic-question generation; [`calculate_metrics`] aggregates
//! reviewer outcomes for generated items.

mod diagnostic;
mod metrics;
mod result;

pub use diagnostic::{
    DiagnosticValidator, MAX_STATEMENT_SENTENCES, MIN_INSTRUCTION_CHARS, PERMITTED_ANSWER_KEYS,
    Profile, TIME_WARNING_MINUTES,
};
pub use metrics::{GenerationMetrics, OutcomeRecord, ReviewOutcome, calculate_metrics};
pub use result::ValidationResult;
