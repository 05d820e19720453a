//! Constructor methods for AulaError

use super::types::AulaError;

impl AulaError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: None,
        }
    }

    /// Create a configuration error with context
    pub fn config_with_context(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: Some(context.into()),
        }
    }

    /// Create a provider error without an HTTP status
    pub fn provider(engine: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            engine: engine.into(),
            status: None,
            message: message.into(),
        }
    }

    /// Create a provider error carrying the upstream HTTP status
    pub fn provider_with_status(
        engine: impl Into<String>,
        status: u16,
        message: impl Into<String>,
    ) -> Self {
        Self::Provider {
            engine: engine.into(),
            status: Some(status),
            message: message.into(),
        }
    }

    /// Create an unsupported engine error
    pub fn unsupported_engine(engine: impl Into<String>) -> Self {
        Self::UnsupportedEngine {
            engine: engine.into(),
        }
    }

    /// Create a validation exhaustion error
    pub fn validation_exhausted(attempts: u32, errors: Vec<String>) -> Self {
        Self::ValidationExhausted { attempts, errors }
    }

    /// Create a "nothing was attempted" error
    pub fn no_candidate(message: impl Into<String>) -> Self {
        Self::NoCandidateAvailable {
            message: message.into(),
        }
    }

    /// Create a JSON error
    pub fn json(message: impl Into<String>) -> Self {
        Self::Json {
            message: message.into(),
        }
    }

    /// Create an IO error with path
    pub fn io_with_path(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Create an HTTP transport error
    pub fn http(message: impl Into<String>) -> Self {
        Self::Http {
            message: message.into(),
            status_code: None,
        }
    }

    /// Create a usage-tracking error
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }

    /// Add context to a configuration error; other variants are returned unchanged
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        if let Self::Config { context: c, .. } = &mut self {
            *c = Some(context.into());
        }
        self
    }
}
