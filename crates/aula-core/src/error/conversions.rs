//! Conversions from library errors

use super::types::AulaError;

impl From<serde_json::Error> for AulaError {
    fn from(err: serde_json::Error) -> Self {
        Self::json(err.to_string())
    }
}

impl From<std::io::Error> for AulaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            path: None,
        }
    }
}

impl From<reqwest::Error> for AulaError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http {
            status_code: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

impl From<config::ConfigError> for AulaError {
    fn from(err: config::ConfigError) -> Self {
        Self::config_with_context(err.to_string(), "Loading pipeline configuration")
    }
}
