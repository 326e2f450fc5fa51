//! # Design
//!
//! - Every session failure folds into "unauthenticated" for the caller; the
//!   variants only differ in whether the stored cookie must be purged.
//! - Messages are constant; context stays in fields.

use thiserror::Error;

/// Result alias for session operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Reasons a session credential was not accepted, or could not be minted.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The request carried no credential at all.
    #[error("no session credential presented")]
    NoCredential,
    /// The token was malformed or its signature did not verify.
    #[error("session credential signature or format invalid")]
    InvalidSignatureOrFormat {
        /// Underlying decoding error.
        #[source]
        source: jsonwebtoken::errors::Error,
    },
    /// The token verified but its expiry is not after the current instant.
    #[error("session credential expired")]
    Expired {
        /// Expiry claim in seconds since the epoch.
        expired_at: i64,
    },
    /// No signing secret is configured.
    #[error("session signing secret not configured")]
    MissingSecret,
    /// Minting a token failed.
    #[error("failed to sign session credential")]
    Signing {
        /// Underlying encoding error.
        #[source]
        source: jsonwebtoken::errors::Error,
    },
}

impl AuthError {
    /// Whether the stored cookie should be cleared when this error denies a request.
    #[must_use]
    pub const fn clears_cookie(&self) -> bool {
        matches!(
            self,
            Self::InvalidSignatureOrFormat { .. } | Self::Expired { .. }
        )
    }

    /// Stable label used for metrics and structured logs.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::NoCredential => "no_credential",
            Self::InvalidSignatureOrFormat { .. } => "invalid",
            Self::Expired { .. } => "expired",
            Self::MissingSecret => "missing_secret",
            Self::Signing { .. } => "signing",
        }
    }
}

/// Errors raised while hashing or verifying admin passwords.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// Hashing the password failed.
    #[error("failed to hash password")]
    Hash {
        /// Underlying hashing error.
        detail: argon2::password_hash::Error,
    },
    /// The stored hash could not be parsed.
    #[error("stored password hash is invalid")]
    StoredHashInvalid {
        /// Underlying parse error.
        detail: argon2::password_hash::Error,
    },
    /// Verification failed for a reason other than a mismatch.
    #[error("failed to verify password")]
    Verify {
        /// Underlying verification error.
        detail: argon2::password_hash::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_rejected_tokens_clear_the_cookie() {
        assert!(!AuthError::NoCredential.clears_cookie());
        assert!(!AuthError::MissingSecret.clears_cookie());
        assert!(AuthError::Expired { expired_at: 0 }.clears_cookie());
    }

    #[test]
    fn reasons_are_stable_labels() {
        assert_eq!(AuthError::NoCredential.reason(), "no_credential");
        assert_eq!(AuthError::Expired { expired_at: 1 }.reason(), "expired");
        assert_eq!(AuthError::MissingSecret.reason(), "missing_secret");
        assert_eq!(
            AuthError::Expired { expired_at: 1 }.to_string(),
            "session credential expired"
        );
    }
}
