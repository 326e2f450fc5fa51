//! # Design
//!
//! - Centralize application-level errors for the boot sequence.
//! - Keep error messages constant while carrying the failing operation as a field.
//! - Preserve source errors without re-logging at call sites.

use thiserror::Error;

/// Result alias for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("configuration operation failed")]
    Config {
        /// Operation identifier.
        operation: &'static str,
        /// Source configuration error.
        source: mundo_config::ConfigError,
    },
    /// Telemetry operations failed.
    #[error("telemetry operation failed")]
    Telemetry {
        /// Operation identifier.
        operation: &'static str,
        /// Source telemetry error.
        source: mundo_telemetry::TelemetryError,
    },
    /// Content store operations failed.
    #[error("content store operation failed")]
    Data {
        /// Operation identifier.
        operation: &'static str,
        /// Source data error.
        source: mundo_data::DataError,
    },
    /// Upload folder operations failed.
    #[error("media folder operation failed")]
    Media {
        /// Operation identifier.
        operation: &'static str,
        /// Source media error.
        source: mundo_media::MediaError,
    },
    /// Password hashing failed.
    #[error("password operation failed")]
    Password {
        /// Operation identifier.
        operation: &'static str,
        /// Source password error.
        source: mundo_auth::PasswordError,
    },
    /// API server operations failed.
    #[error("api server operation failed")]
    ApiServer {
        /// Operation identifier.
        operation: &'static str,
        /// Source API server error.
        source: mundo_api::ApiServerError,
    },
}

impl AppError {
    pub(crate) const fn config(operation: &'static str, source: mundo_config::ConfigError) -> Self {
        Self::Config { operation, source }
    }

    pub(crate) const fn telemetry(
        operation: &'static str,
        source: mundo_telemetry::TelemetryError,
    ) -> Self {
        Self::Telemetry { operation, source }
    }

    pub(crate) const fn data(operation: &'static str, source: mundo_data::DataError) -> Self {
        Self::Data { operation, source }
    }

    pub(crate) const fn media(operation: &'static str, source: mundo_media::MediaError) -> Self {
        Self::Media { operation, source }
    }

    pub(crate) const fn password(
        operation: &'static str,
        source: mundo_auth::PasswordError,
    ) -> Self {
        Self::Password { operation, source }
    }

    pub(crate) const fn api_server(
        operation: &'static str,
        source: mundo_api::ApiServerError,
    ) -> Self {
        Self::ApiServer { operation, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn app_error_helpers_build_variants() {
        let config = AppError::config(
            "config.load",
            mundo_config::ConfigError::IncompletePair {
                present: "MUNDO_BOOTSTRAP_ADMIN_USERNAME",
                missing: "MUNDO_BOOTSTRAP_ADMIN_PASSWORD",
            },
        );
        assert!(matches!(
            config,
            AppError::Config {
                operation: "config.load",
                ..
            }
        ));
        assert_eq!(config.to_string(), "configuration operation failed");
        assert!(config.source().is_some());

        let data = AppError::data(
            "store.seed",
            mundo_data::DataError::Conflict {
                collection: "admin_users",
                field: "username",
            },
        );
        assert_eq!(data.to_string(), "content store operation failed");
        assert!(data.source().is_some());

        let media = AppError::media(
            "media.ensure_buckets",
            mundo_media::MediaError::UnknownBucket {
                value: "x".to_string(),
            },
        );
        assert!(matches!(media, AppError::Media { .. }));

        let serve = AppError::api_server(
            "api_server.serve",
            mundo_api::ApiServerError::Serve {
                source: std::io::Error::other("closed"),
            },
        );
        assert_eq!(serve.to_string(), "api server operation failed");
    }
}
