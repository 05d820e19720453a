//! Validation outcome

use serde::{Deserialize, Serialize};

/// Outcome of validating one generated payload
///
/// `errors` block acceptance, `warnings` never do.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// A passing result with no findings
    pub fn ok() -> Self {
        Self {
            valid: true,
            ..Self::default()
        }
    }

    pub fn invalid(errors: Vec<String>) -> Self {
        Self::from_parts(errors, Vec::new())
    }

    /// `valid` is derived from `errors`
    pub fn from_parts(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}
