//! Generation request types

use crate::anonymize::AnonymizationContext;
use crate::engine::EngineId;
use crate::llm::{GenerationOptions, LlmMessage};
use serde::{Deserialize, Serialize};

/// Which engine(s) serve a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EngineSelection {
    Single(EngineId),
    /// Tried in order until one answers
    Chain(Vec<EngineId>),
}

impl EngineSelection {
    /// Single engine for a one-element list
    pub fn from_engines(mut engines: Vec<EngineId>) -> Self {
        if engines.len() == 1 {
            Self::Single(engines.remove(0))
        } else {
            Self::Chain(engines)
        }
    }
}

/// One call into the pipeline
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub messages: Vec<LlmMessage>,
    /// `None` uses the configured default engine chain
    pub selection: Option<EngineSelection>,
    pub options: GenerationOptions,
    pub anonymization: Option<AnonymizationContext>,
}

impl GenerationRequest {
    pub fn new(messages: Vec<LlmMessage>) -> Self {
        Self {
            messages,
            ..Self::default()
        }
    }

    pub fn with_engine(mut self, engine: EngineId) -> Self {
        self.selection = Some(EngineSelection::Single(engine));
        self
    }

    pub fn with_engines(mut self, engines: Vec<EngineId>) -> Self {
        self.selection = Some(EngineSelection::from_engines(engines));
        self
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_anonymization(mut self, context: AnonymizationContext) -> Self {
        self.anonymization = Some(context);
        self
    }
}
