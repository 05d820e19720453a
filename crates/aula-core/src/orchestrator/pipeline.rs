//! Orchestrator facade

use super::fallback::first_available;
use super::json::parse_json_response;
use super::request::{EngineSelection, GenerationRequest};
use super::retry::{RetryOutcome, generate_with_retry};
use crate::anonymize::anonymize;
use crate::config::PipelineConfig;
use crate::engine::{EngineId, TextGenerator};
use crate::error::{AulaError, AulaResult};
use crate::llm::{GenerationOptions, LlmMessage};
use crate::validation::ValidationResult;
use serde_json::Value;
use tracing::{debug, instrument};

/// Runs requests through anonymization, dispatch and restoration
pub struct Orchestrator<G> {
    generator: G,
    config: PipelineConfig,
}

impl<G: TextGenerator> Orchestrator<G> {
    pub fn new(generator: G, config: PipelineConfig) -> Self {
        Self { generator, config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Generate text with names restored
    #[instrument(skip_all, fields(messages = request.messages.len()))]
    pub async fn generate(&self, request: &GenerationRequest) -> AulaResult<String> {
        let anonymized = anonymize(&request.messages, request.anonymization.as_ref());
        let selection = request
            .selection
            .clone()
            .unwrap_or_else(|| EngineSelection::from_engines(self.config.engine_chain()));

        let text = self
            .dispatch(&selection, &anonymized.messages, &request.options)
            .await?;
        Ok(anonymized.restorer.restore(&text))
    }

    /// Generate JSON that `validate` accepts, retrying up to `max_retries`
    /// extra times (the configured value when `None`)
    ///
    /// Unparsable output counts as a rejected attempt.
    pub async fn generate_validated<V>(
        &self,
        request: &GenerationRequest,
        validate: V,
        max_retries: Option<u32>,
    ) -> AulaResult<RetryOutcome<Value>>
    where
        V: Fn(&Value) -> ValidationResult,
    {
        let max_retries = max_retries.unwrap_or(self.config.max_retries);
        let orchestrator = self;

        let outcome = generate_with_retry(
            move || async move {
                let text = orchestrator.generate(request).await?;
                Ok(parse_json_response(&text))
            },
            |parsed: &Result<Value, String>| match parsed {
                Ok(value) => validate(value),
                Err(reason) => ValidationResult::invalid(vec![reason.clone()]),
            },
            max_retries,
        )
        .await?;

        let value = outcome
            .result
            .map_err(|reason| AulaError::json(reason))?;
        Ok(RetryOutcome {
            result: value,
            attempts: outcome.attempts,
        })
    }

    async fn dispatch(
        &self,
        selection: &EngineSelection,
        messages: &[LlmMessage],
        options: &GenerationOptions,
    ) -> AulaResult<String> {
        match selection {
            EngineSelection::Single(engine) => self.dispatch_engine(*engine, messages, options).await,
            EngineSelection::Chain(engines) => {
                first_available(engines.as_slice(), move |engine: &EngineId| {
                    self.dispatch_engine(*engine, messages, options)
                })
                .await
            }
        }
    }

    /// One engine, with configured model fallbacks unless a model is forced
    async fn dispatch_engine(
        &self,
        engine: EngineId,
        messages: &[LlmMessage],
        options: &GenerationOptions,
    ) -> AulaResult<String> {
        match self.config.models_for(engine) {
            Some(models) if options.model.is_none() => {
                debug!(engine = %engine, models = models.len(), "using model fallbacks");
                self.generator
                    .generate_with_models(engine, models, messages, options)
                    .await
            }
            _ => self.generator.generate(engine, messages, options).await,
        }
    }
}
