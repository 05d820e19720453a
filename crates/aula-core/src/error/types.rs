//! Core error type for the pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type AulaResult<T> = Result<T, AulaError>;

/// Main error type for the generation pipeline
#[derive(Error, Debug, Clone)]
pub enum AulaError {
    /// Missing or shape-invalid configuration (credentials, config files)
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// Engine returned a non-success response or an unusable payload
    #[error("{engine} provider error{}: {message}", .status.map(|s| format!(" (status {})", s)).unwrap_or_default())]
    Provider {
        engine: String,
        status: Option<u16>,
        message: String,
    },

    /// Engine identifier outside the supported set
    #[error("Unsupported engine: {engine}")]
    UnsupportedEngine { engine: String },

    /// Generated content failed validation on every attempt
    #[error("Generated content rejected after {attempts} attempts: {}", .errors.join("; "))]
    ValidationExhausted { attempts: u32, errors: Vec<String> },

    /// A fallback list finished without ever attempting a candidate
    #[error("No candidate available: {message}")]
    NoCandidateAvailable { message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json { message: String },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    /// Transport-level HTTP failures (connect, timeout, TLS)
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        status_code: Option<u16>,
    },

    /// Usage-tracking sink failures; never surfaced past the tracker
    #[error("Usage tracking error: {message}")]
    Usage { message: String },
}
