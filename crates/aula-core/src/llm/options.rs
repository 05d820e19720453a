//! Per-request generation parameters

use serde::{Deserialize, Serialize};

/// Parameters for a single generation call
///
/// `api_key` overrides credential resolution for the targeted engine;
/// `workspace_id` and `source` are forwarded to usage tracking only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Sampling temperature; falls back to the engine default
    pub temperature: Option<f32>,
    /// Maximum output tokens
    pub max_tokens: Option<u32>,
    /// Explicit credential, bypassing the environment
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Model name; falls back to the engine's env override or default
    pub model: Option<String>,
    /// Tenant the call is billed to
    pub workspace_id: Option<String>,
    /// Feature that issued the call (e.g. "diagnostico", "pei")
    pub source: Option<String>,
}

impl GenerationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_workspace(mut self, workspace_id: impl Into<String>) -> Self {
        self.workspace_id = Some(workspace_id.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}
