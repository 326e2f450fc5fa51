//! Error types for configuration loading.

use thiserror::Error;

/// Result alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Primary error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Field contained an invalid value.
    #[error("invalid configuration field")]
    InvalidField {
        /// Environment variable that failed validation.
        field: &'static str,
        /// Offending value when it is safe to echo.
        value: Option<String>,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
    /// Two fields must be provided together.
    #[error("incomplete configuration pair")]
    IncompletePair {
        /// Variable that was set.
        present: &'static str,
        /// Variable that was missing.
        missing: &'static str,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, value: &str, reason: &'static str) -> Self {
        Self::InvalidField {
            field,
            value: Some(value.to_string()),
            reason,
        }
    }

    pub(crate) const fn invalid_redacted(field: &'static str, reason: &'static str) -> Self {
        Self::InvalidField {
            field,
            value: None,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_messages_are_constant() {
        let invalid = ConfigError::invalid("MUNDO_HTTP_PORT", "abc", "must be an integer");
        assert_eq!(invalid.to_string(), "invalid configuration field");
        let pair = ConfigError::IncompletePair {
            present: "MUNDO_BOOTSTRAP_ADMIN_USERNAME",
            missing: "MUNDO_BOOTSTRAP_ADMIN_PASSWORD",
        };
        assert_eq!(pair.to_string(), "incomplete configuration pair");
        assert!(matches!(
            ConfigError::invalid_redacted("MUNDO_JWT_SECRET", "too short"),
            ConfigError::InvalidField { value: None, .. }
        ));
    }
}
