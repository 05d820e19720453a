//! Credential resolution and shape validation

use super::id::EngineId;
use crate::config::EnvSource;
use crate::error::{AulaError, AulaResult};
use std::collections::HashMap;
use tracing::debug;

const OPENAI_KEY_PREFIX: &str = "sk-";
const ANTHROPIC_KEY_PREFIX: &str = "sk-ant-";

/// Resolves engine credentials: explicit override first, then the engine's
/// environment variables in priority order
#[derive(Clone, Default)]
pub struct CredentialResolver {
    env: EnvSource,
    overrides: HashMap<EngineId, String>,
}

impl std::fmt::Debug for CredentialResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut overridden: Vec<_> = self.overrides.keys().collect();
        overridden.sort();
        f.debug_struct("CredentialResolver")
            .field("overrides", &overridden)
            .finish_non_exhaustive()
    }
}

/// Where a credential came from, for status displays
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialStatus {
    Override { masked: String },
    Env { var: &'static str, masked: String },
    Invalid { reason: String },
    Missing { vars: &'static [&'static str] },
}

impl CredentialStatus {
    pub fn is_usable(&self) -> bool {
        matches!(self, Self::Override { .. } | Self::Env { .. })
    }
}

impl CredentialResolver {
    pub fn new(env: EnvSource) -> Self {
        Self {
            env,
            overrides: HashMap::new(),
        }
    }

    /// Pin a credential for an engine, ahead of the environment
    pub fn with_override(mut self, engine: EngineId, key: impl Into<String>) -> Self {
        self.overrides.insert(engine, key.into());
        self
    }

    pub fn env(&self) -> &EnvSource {
        &self.env
    }

    /// Resolve and shape-check the credential for `engine`
    ///
    /// `call_override` (a per-call key) wins over resolver overrides and the
    /// environment. Errors are raised before any network call.
    pub fn resolve(&self, engine: EngineId, call_override: Option<&str>) -> AulaResult<String> {
        let key = self.lookup(engine, call_override).ok_or_else(|| missing(engine))?;
        validate_key_shape(engine, &key)?;
        Ok(key)
    }

    /// Describe the credential state without exposing the secret
    pub fn status(&self, engine: EngineId) -> CredentialStatus {
        let vars = engine.profile().key_env_vars;
        let (key, from_env) = if let Some(key) = self.overrides.get(&engine) {
            (key.clone(), None)
        } else if let Some((var, key)) = self.env.first_of(vars) {
            (key, Some(var))
        } else {
            return CredentialStatus::Missing { vars };
        };

        if let Err(e) = validate_key_shape(engine, &key) {
            return CredentialStatus::Invalid {
                reason: e.to_string(),
            };
        }

        let masked = mask_api_key(&key);
        match from_env {
            Some(var) => CredentialStatus::Env { var, masked },
            None => CredentialStatus::Override { masked },
        }
    }

    fn lookup(&self, engine: EngineId, call_override: Option<&str>) -> Option<String> {
        if let Some(key) = call_override.map(str::trim).filter(|k| !k.is_empty()) {
            debug!(engine = %engine, "using per-call credential override");
            return Some(key.to_string());
        }
        if let Some(key) = self.overrides.get(&engine) {
            debug!(engine = %engine, "using configured credential override");
            return Some(key.clone());
        }
        self.env
            .first_of(engine.profile().key_env_vars)
            .map(|(var, key)| {
                debug!(engine = %engine, var, "using credential from environment");
                key
            })
    }
}

fn missing(engine: EngineId) -> AulaError {
    let profile = engine.profile();
    AulaError::config(format!(
        "{} engine ({}) has no API key. Set {}",
        engine,
        profile.provider,
        profile.key_env_vars.join(" or ")
    ))
}

/// Reject credentials that belong to a different provider
///
/// The orange engine needs an OpenAI-style `sk-` key; `sk-ant-` keys are
/// Anthropic keys and would otherwise be sent to OpenAI.
pub fn validate_key_shape(engine: EngineId, key: &str) -> AulaResult<()> {
    if engine != EngineId::Orange {
        return Ok(());
    }
    if key.starts_with(ANTHROPIC_KEY_PREFIX) {
        return Err(AulaError::config(
            "OPENAI_API_KEY holds an Anthropic key (sk-ant-...). Use it in ANTHROPIC_API_KEY for the green engine and set an OpenAI key for orange",
        ));
    }
    if !key.starts_with(OPENAI_KEY_PREFIX) {
        return Err(AulaError::config(
            "OPENAI_API_KEY must start with 'sk-' for the orange engine (OpenAI)",
        ));
    }
    Ok(())
}

/// Mask an API key for safe display
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let len = chars.len();
    if len <= 12 {
        return "*".repeat(len);
    }

    let prefix: String = chars[..8].iter().collect();
    let suffix: String = chars[len - 4..].iter().collect();
    format!("{}{}...{}", prefix, "*".repeat((len - 12).min(8)), suffix)
}
