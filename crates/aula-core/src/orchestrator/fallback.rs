//! Ordered fallback over engines or model names

use crate::error::{AulaError, AulaResult};
use std::fmt::Display;
use std::future::Future;
use tracing::{debug, info, warn};

/// Try `candidates` in order and return the first non-empty text
///
/// A skippable failure (see [`AulaError::is_skippable`]) moves on without
/// being remembered. Any other failure, including an empty answer, becomes
/// the last error and iteration still continues. Exhaustion returns the last
/// error, or `NoCandidateAvailable` when nothing produced one.
pub async fn first_available<'a, C, F, Fut>(candidates: &'a [C], mut attempt: F) -> AulaResult<String>
where
    C: Display,
    F: FnMut(&'a C) -> Fut,
    Fut: Future<Output = AulaResult<String>>,
{
    let mut last_error: Option<AulaError> = None;

    for (index, candidate) in candidates.iter().enumerate() {
        debug!(candidate = %candidate, position = index, "trying candidate");

        match attempt(candidate).await {
            Ok(text) if !text.trim().is_empty() => {
                if index > 0 {
                    info!(candidate = %candidate, position = index, "fell back to candidate");
                }
                return Ok(text);
            }
            Ok(_) => {
                warn!(candidate = %candidate, "candidate returned an empty response");
                last_error = Some(AulaError::provider(
                    candidate.to_string(),
                    "returned an empty response",
                ));
            }
            Err(e) if e.is_skippable() => {
                info!(candidate = %candidate, error = %e, "candidate unavailable, skipping");
            }
            Err(e) => {
                warn!(candidate = %candidate, error = %e, "candidate failed");
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| {
        AulaError::no_candidate(format!(
            "none of {} candidate(s) could be attempted",
            candidates.len()
        ))
    }))
}
