//! Pipeline settings loaded through the `config` crate

use super::env::EnvSource;
use super::timeouts::TimeoutConfig;
use crate::engine::EngineId;
use crate::error::{AulaError, AulaResult};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Prefix for environment overrides (`AULA_MAX_RETRIES`, ...)
pub const ENV_PREFIX: &str = "AULA";

/// Variable naming the config file when no path is given
pub const CONFIG_PATH_ENV: &str = "AULA_CONFIG";

/// Settings shared by every orchestrator invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Additional attempts after the first when validation fails
    pub max_retries: u32,
    /// HTTP connect timeout for engine calls
    pub connect_timeout_secs: u64,
    /// HTTP end-to-end timeout for engine calls
    pub request_timeout_secs: u64,
    /// Engine used when a request names none
    pub default_engine: EngineId,
    /// Ordered engines tried after the default one
    pub fallback_engines: Vec<EngineId>,
    /// Ordered model names per engine label, tried when no model is forced
    pub model_fallbacks: HashMap<String, Vec<String>>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            connect_timeout_secs: TimeoutConfig::DEFAULT_CONNECTION_SECS,
            request_timeout_secs: TimeoutConfig::DEFAULT_REQUEST_SECS,
            default_engine: EngineId::Orange,
            fallback_engines: Vec::new(),
            model_fallbacks: HashMap::new(),
        }
    }
}

impl PipelineConfig {
    /// Load from an optional file plus `AULA_*` variables of `env`
    ///
    /// Without an explicit path, `AULA_CONFIG` is consulted; a missing
    /// variable means defaults plus environment only.
    pub fn load(path: Option<&Path>, env: &EnvSource) -> AulaResult<Self> {
        let path: Option<PathBuf> = path
            .map(Path::to_path_buf)
            .or_else(|| env.get(CONFIG_PATH_ENV).map(PathBuf::from));

        let mut builder = Config::builder();
        if let Some(path) = &path {
            if !path.exists() {
                return Err(AulaError::config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            debug!(path = %path.display(), "loading pipeline config file");
            builder = builder.add_source(File::from(path.as_path()));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("fallback_engines")
                .source(env.as_map()),
        );

        let config: PipelineConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn timeouts(&self) -> TimeoutConfig {
        TimeoutConfig::new(self.connect_timeout_secs, self.request_timeout_secs)
    }

    /// Default engine followed by the configured fallbacks, without repeats
    pub fn engine_chain(&self) -> Vec<EngineId> {
        let mut chain = vec![self.default_engine];
        for engine in &self.fallback_engines {
            if !chain.contains(engine) {
                chain.push(*engine);
            }
        }
        chain
    }

    /// Configured model fallbacks for `engine`, if any
    pub fn models_for(&self, engine: EngineId) -> Option<&[String]> {
        self.model_fallbacks
            .get(engine.label())
            .map(Vec::as_slice)
            .filter(|models| !models.is_empty())
    }

    pub fn validate(&self) -> AulaResult<()> {
        self.timeouts()
            .validate()
            .map_err(|e| AulaError::config_with_context(e, "Validating pipeline timeouts"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_sources() {
        let config = PipelineConfig::load(None, &EnvSource::fixed(Vec::<(String, String)>::new()))
            .unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.engine_chain(), vec![EngineId::Orange]);
    }

    #[test]
    fn test_env_overrides() {
        let env = EnvSource::fixed([
            ("AULA_MAX_RETRIES", "4"),
            ("AULA_REQUEST_TIMEOUT_SECS", "300"),
            ("AULA_DEFAULT_ENGINE", "green"),
            ("AULA_FALLBACK_ENGINES", "red,orange,green"),
        ]);
        let config = PipelineConfig::load(None, &env).unwrap();

        assert_eq!(config.max_retries, 4);
        assert_eq!(config.request_timeout_secs, 300);
        assert_eq!(
            config.engine_chain(),
            vec![EngineId::Green, EngineId::Red, EngineId::Orange]
        );
    }

    #[test]
    fn test_file_then_env() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "max_retries = 1\ndefault_engine = \"yellow\"\n\n[model_fallbacks]\nyellow = [\"gemini-2.5-flash\", \"gemini-2.0-flash\"]"
        )
        .unwrap();

        let env = EnvSource::fixed([("AULA_MAX_RETRIES", "3")]);
        let config = PipelineConfig::load(Some(file.path()), &env).unwrap();

        assert_eq!(config.max_retries, 3);
        assert_eq!(config.default_engine, EngineId::Yellow);
        assert_eq!(
            config.models_for(EngineId::Yellow).unwrap(),
            ["gemini-2.5-flash", "gemini-2.0-flash"]
        );
        assert!(config.models_for(EngineId::Red).is_none());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = PipelineConfig::load(
            Some(Path::new("/nonexistent/aula.toml")),
            &EnvSource::fixed(Vec::<(String, String)>::new()),
        )
        .unwrap_err();
        assert!(matches!(err, AulaError::Config { .. }));
    }

    #[test]
    fn test_invalid_timeouts_rejected() {
        let env = EnvSource::fixed([
            ("AULA_CONNECT_TIMEOUT_SECS", "60"),
            ("AULA_REQUEST_TIMEOUT_SECS", "10"),
        ]);
        assert!(PipelineConfig::load(None, &env).is_err());
    }
}
