//! Error types for the content store.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// Result alias for data layer operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors raised by the content store.
#[derive(Debug)]
pub enum DataError {
    /// The requested document does not exist.
    NotFound {
        /// Collection that was searched.
        collection: &'static str,
        /// Identifier that was requested.
        id: String,
    },
    /// A uniqueness constraint was violated.
    Conflict {
        /// Collection holding the conflicting document.
        collection: &'static str,
        /// Field that must be unique.
        field: &'static str,
    },
    /// A field failed validation.
    Invalid {
        /// Field that failed validation.
        field: &'static str,
        /// Machine-readable reason.
        reason: &'static str,
    },
    /// A submitted document could not be decoded into its typed form.
    Malformed {
        /// Underlying decode error.
        source: serde_json::Error,
    },
    /// Migration execution failed.
    MigrationFailed {
        /// Underlying migration error.
        source: sqlx::migrate::MigrateError,
    },
    /// A database operation failed.
    QueryFailed {
        /// Operation identifier.
        operation: &'static str,
        /// Underlying SQL error.
        source: sqlx::Error,
    },
    /// A stored document could not be encoded or decoded.
    Serialization {
        /// Collection involved.
        collection: &'static str,
        /// Underlying serde error.
        source: serde_json::Error,
    },
}

impl DataError {
    pub(crate) const fn invalid(field: &'static str, reason: &'static str) -> Self {
        Self::Invalid { field, reason }
    }
}

impl Display for DataError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { .. } => formatter.write_str("document not found"),
            Self::Conflict { .. } => formatter.write_str("document conflicts with an existing one"),
            Self::Invalid { .. } => formatter.write_str("document failed validation"),
            Self::Malformed { .. } => formatter.write_str("document payload malformed"),
            Self::MigrationFailed { .. } => formatter.write_str("migration failed"),
            Self::QueryFailed { .. } => formatter.write_str("database operation failed"),
            Self::Serialization { .. } => formatter.write_str("stored document could not be decoded"),
        }
    }
}

impl Error for DataError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound { .. } | Self::Conflict { .. } | Self::Invalid { .. } => None,
            Self::Malformed { source } | Self::Serialization { source, .. } => Some(source),
            Self::MigrationFailed { source } => Some(source),
            Self::QueryFailed { source, .. } => Some(source),
        }
    }
}

pub(crate) fn map_query_err(operation: &'static str) -> impl FnOnce(sqlx::Error) -> DataError {
    move |source| DataError::QueryFailed { operation, source }
}
