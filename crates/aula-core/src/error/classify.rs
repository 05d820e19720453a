//! Error classification for fallback chains and HTTP mapping

use super::types::AulaError;

impl AulaError {
    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "AULA_CONFIG",
            Self::Provider { .. } => "AULA_PROVIDER",
            Self::UnsupportedEngine { .. } => "AULA_UNSUPPORTED_ENGINE",
            Self::ValidationExhausted { .. } => "AULA_VALIDATION",
            Self::NoCandidateAvailable { .. } => "AULA_NO_CANDIDATE",
            Self::Json { .. } => "AULA_JSON",
            Self::Io { .. } => "AULA_IO",
            Self::Http { .. } => "AULA_HTTP",
            Self::Usage { .. } => "AULA_USAGE",
        }
    }

    /// Upstream HTTP status attached to the error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Provider { status, .. } => *status,
            Self::Http { status_code, .. } => *status_code,
            _ => None,
        }
    }

    /// Whether a fallback chain should treat this failure as "candidate
    /// unavailable" and move on without recording it as the last error.
    ///
    /// Structured status codes win; the message heuristic only applies when
    /// the provider gave no status.
    pub fn is_skippable(&self) -> bool {
        match self {
            Self::UnsupportedEngine { .. } => true,
            Self::Provider {
                status: Some(code), ..
            } => *code == 404,
            Self::Provider {
                status: None,
                message,
                ..
            } => {
                let lower = message.to_lowercase();
                lower.contains("not found")
                    || lower.contains("not_found")
                    || lower.contains("unsupported model")
                    || lower.contains("model_not_found")
            }
            _ => false,
        }
    }

    /// HTTP status an exposed endpoint should answer with
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Config { .. } | Self::UnsupportedEngine { .. } => 400,
            Self::ValidationExhausted { .. } => 422,
            Self::NoCandidateAvailable { .. } => 503,
            Self::Provider { .. } | Self::Http { .. } => 502,
            Self::Json { .. } | Self::Io { .. } | Self::Usage { .. } => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status_is_skippable() {
        let err = AulaError::provider_with_status("yellow", 404, "models/gemini-x is not found");
        assert!(err.is_skippable());

        let err = AulaError::provider_with_status("yellow", 401, "model not found in key scope");
        assert!(!err.is_skippable(), "status code takes precedence over text");
    }

    #[test]
    fn test_message_heuristic_without_status() {
        assert!(AulaError::provider("orange", "The model `gpt-9` does not exist or is not found").is_skippable());
        assert!(!AulaError::provider("orange", "insufficient_quota").is_skippable());
    }

    #[test]
    fn test_unsupported_engine_is_skippable() {
        assert!(AulaError::unsupported_engine("violet").is_skippable());
        assert!(!AulaError::config("missing key").is_skippable());
    }

    #[test]
    fn test_display_messages_are_actionable() {
        let err = AulaError::validation_exhausted(3, vec!["gabarito inválido".into(), "sem contexto".into()]);
        let msg = err.to_string();
        assert!(msg.contains("3 attempts"));
        assert!(msg.contains("gabarito inválido; sem contexto"));

        let err = AulaError::provider_with_status("green", 529, "overloaded");
        assert_eq!(err.to_string(), "green provider error (status 529): overloaded");
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(AulaError::config("x").http_status(), 400);
        assert_eq!(AulaError::provider("red", "x").http_status(), 502);
        assert_eq!(AulaError::validation_exhausted(1, vec![]).http_status(), 422);
        assert_eq!(AulaError::no_candidate("x").http_status(), 503);
    }
}
