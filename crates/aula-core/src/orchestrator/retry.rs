//! Bounded validate-retry loop

use crate::error::{AulaError, AulaResult};
use crate::validation::ValidationResult;
use std::future::Future;
use tracing::{debug, info, warn};

/// Additional attempts after the first
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Accepted value and the 1-based attempt that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct RetryOutcome<T> {
    pub result: T,
    pub attempts: u32,
}

/// Progress of one validate-retry invocation
#[derive(Debug, Clone)]
pub struct RetryState {
    attempts: u32,
    max_retries: u32,
    last: Option<ValidationResult>,
    /// Distinct errors across every rejected attempt, first-seen order
    errors: Vec<String>,
}

impl RetryState {
    pub fn new(max_retries: u32) -> Self {
        Self {
            attempts: 0,
            max_retries,
            last: None,
            errors: Vec::new(),
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Begin the next attempt and return its 1-based index
    pub fn start_attempt(&mut self) -> u32 {
        self.attempts += 1;
        self.attempts
    }

    pub fn record_rejection(&mut self, result: ValidationResult) {
        for error in &result.errors {
            if !self.errors.contains(error) {
                self.errors.push(error.clone());
            }
        }
        self.last = Some(result);
    }

    pub fn has_attempts_left(&self) -> bool {
        self.attempts < self.max_attempts()
    }

    pub fn last_result(&self) -> Option<&ValidationResult> {
        self.last.as_ref()
    }

    /// Exhaustion error carrying every distinct validator error
    pub fn into_error(self) -> AulaError {
        AulaError::validation_exhausted(self.attempts, self.errors)
    }
}

/// Call `generate` until `validate` accepts its output
///
/// At most `max_retries + 1` calls. Errors from `generate` are returned
/// immediately and do not consume retries.
pub async fn generate_with_retry<T, G, Fut, V>(
    mut generate: G,
    validate: V,
    max_retries: u32,
) -> AulaResult<RetryOutcome<T>>
where
    G: FnMut() -> Fut,
    Fut: Future<Output = AulaResult<T>>,
    V: Fn(&T) -> ValidationResult,
{
    let mut state = RetryState::new(max_retries);

    loop {
        let attempt = state.start_attempt();
        let candidate = generate().await?;
        let verdict = validate(&candidate);

        if verdict.valid {
            if attempt > 1 {
                info!(attempt, "generated content accepted after retry");
            }
            if !verdict.warnings.is_empty() {
                debug!(attempt, warnings = ?verdict.warnings, "accepted with warnings");
            }
            return Ok(RetryOutcome {
                result: candidate,
                attempts: attempt,
            });
        }

        warn!(
            attempt,
            max_attempts = state.max_attempts(),
            errors = ?verdict.errors,
            "generated content rejected"
        );
        state.record_rejection(verdict);

        if !state.has_attempts_left() {
            return Err(state.into_error());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn reject(_: &u32) -> ValidationResult {
        ValidationResult::invalid(vec!["gabarito inválido".into()])
    }

    #[tokio::test]
    async fn test_always_invalid_calls_max_plus_one() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let err = generate_with_retry(
            move || async move { Ok(calls.fetch_add(1, Ordering::SeqCst)) },
            reject,
            2,
        )
        .await
        .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        match err {
            AulaError::ValidationExhausted { attempts, errors } => {
                assert_eq!(attempts, 3);
                assert_eq!(errors, vec!["gabarito inválido"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_second_attempt_accepted() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let outcome = generate_with_retry(
            move || async move { Ok(calls.fetch_add(1, Ordering::SeqCst) + 1) },
            |n: &u32| {
                if *n >= 2 {
                    ValidationResult::ok()
                } else {
                    ValidationResult::invalid(vec!["curto".into()])
                }
            },
            DEFAULT_MAX_RETRIES,
        )
        .await
        .unwrap();

        assert_eq!(outcome, RetryOutcome { result: 2, attempts: 2 });
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_generator_error_propagates_immediately() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let err = generate_with_retry(
            move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(AulaError::provider_with_status("green", 529, "overloaded"))
            },
            reject,
            2,
        )
        .await
        .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(err.status_code(), Some(529));
    }

    #[tokio::test]
    async fn test_zero_retries_is_single_attempt() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let err = generate_with_retry(
            move || async move { Ok(calls.fetch_add(1, Ordering::SeqCst)) },
            reject,
            0,
        )
        .await
        .unwrap_err();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(err.to_string().contains("after 1 attempts"));
    }

    #[tokio::test]
    async fn test_one_retry_reports_two_attempts() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let err = generate_with_retry(
            move || async move { Ok(calls.fetch_add(1, Ordering::SeqCst)) },
            reject,
            1,
        )
        .await
        .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        let message = err.to_string();
        assert!(message.contains("after 2 attempts"), "{message}");
        assert!(message.contains("gabarito inválido"));
    }

    #[tokio::test]
    async fn test_exhaustion_joins_errors_from_every_attempt() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let err = generate_with_retry(
            move || async move { Ok(calls.fetch_add(1, Ordering::SeqCst)) },
            |n: &u32| match n {
                0 => ValidationResult::invalid(vec!["enunciado longo".into()]),
                _ => ValidationResult::invalid(vec![
                    "enunciado longo".into(),
                    "sem contexto visual".into(),
                ]),
            },
            2,
        )
        .await
        .unwrap_err();

        match &err {
            AulaError::ValidationExhausted { attempts, errors } => {
                assert_eq!(*attempts, 3);
                assert_eq!(errors, &vec!["enunciado longo", "sem contexto visual"]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().ends_with("enunciado longo; sem contexto visual"));
    }

    #[test]
    fn test_state_bookkeeping() {
        let mut state = RetryState::new(1);
        assert_eq!(state.start_attempt(), 1);
        assert!(state.has_attempts_left());
        state.record_rejection(ValidationResult::invalid(vec!["x".into()]));
        assert_eq!(state.start_attempt(), 2);
        assert!(!state.has_attempts_left());
        assert_eq!(state.last_result().unwrap().errors, vec!["x"]);
    }
}
