//! HS256 session tokens with an explicit clock.
//!
//! # Design
//! - The caller supplies `now`; expiry is compared here rather than by the
//!   JWT library so tests control time and no leeway is applied.
//! - A token is valid strictly before its `exp` instant.
//! - An absent or empty secret denies everything.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::error::{AuthError, Result};
use crate::identity::{SessionClaims, SessionIdentity};

/// Default credential lifetime.
pub const DEFAULT_SESSION_TTL_SECS: u64 = 3_600;

/// Token minted at login.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    /// Encoded token.
    pub token: String,
    /// Instant the token stops being accepted.
    pub expires_at: DateTime<Utc>,
    /// Lifetime in seconds, for the cookie `Max-Age`.
    pub max_age_secs: u64,
}

/// Signing secret and lifetime, fixed at construction.
#[derive(Clone)]
pub struct SessionKeys {
    secret: Option<Arc<str>>,
    ttl_secs: u64,
}

impl std::fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionKeys")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("ttl_secs", &self.ttl_secs)
            .finish()
    }
}

impl SessionKeys {
    /// Build keys from an optional secret; blank secrets count as absent.
    #[must_use]
    pub fn new(secret: Option<&str>, ttl_secs: u64) -> Self {
        let secret = secret
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(Arc::from);
        Self { secret, ttl_secs }
    }

    /// Whether a signing secret is configured.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// Configured credential lifetime in seconds.
    #[must_use]
    pub const fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Mint a credential for `identity` valid from `now` for the configured lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingSecret`] when no secret is configured, or
    /// [`AuthError::Signing`] if encoding fails.
    pub fn issue(&self, identity: &SessionIdentity, now: DateTime<Utc>) -> Result<IssuedSession> {
        let secret = self.secret.as_deref().ok_or(AuthError::MissingSecret)?;
        issue(identity, secret, now, self.ttl_secs)
    }

    /// Verify a credential at `now`.
    ///
    /// # Errors
    ///
    /// See [`verify`].
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<SessionIdentity> {
        let secret = self.secret.as_deref().ok_or(AuthError::MissingSecret)?;
        verify(token, secret, now)
    }
}

/// Mint a credential signed with `secret`.
///
/// # Errors
///
/// Returns [`AuthError::MissingSecret`] for an empty secret, or
/// [`AuthError::Signing`] if encoding fails.
pub fn issue(
    identity: &SessionIdentity,
    secret: &str,
    now: DateTime<Utc>,
    ttl_secs: u64,
) -> Result<IssuedSession> {
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }
    let expires_at = i64::try_from(ttl_secs)
        .ok()
        .and_then(Duration::try_seconds)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    let claims = SessionClaims {
        sub: identity.user_id.clone(),
        username: identity.username.clone(),
        role: identity.role,
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
    };
    let token = jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|source| AuthError::Signing { source })?;
    Ok(IssuedSession {
        token,
        expires_at,
        max_age_secs: ttl_secs,
    })
}

/// Verify a credential signed with `secret` at the instant `now`.
///
/// # Errors
///
/// - [`AuthError::MissingSecret`] when `secret` is empty.
/// - [`AuthError::InvalidSignatureOrFormat`] for malformed or tampered tokens.
/// - [`AuthError::Expired`] when `exp <= now`.
pub fn verify(token: &str, secret: &str, now: DateTime<Utc>) -> Result<SessionIdentity> {
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }
    let data = jsonwebtoken::decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation(),
    )
    .map_err(|source| AuthError::InvalidSignatureOrFormat { source })?;
    let claims = data.claims;
    if claims.exp <= now.timestamp() {
        return Err(AuthError::Expired {
            expired_at: claims.exp,
        });
    }
    Ok(claims.into_identity())
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);
    validation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Role;
    use chrono::TimeZone;

    const SECRET: &str = "test-signing-secret";

    fn identity() -> SessionIdentity {
        SessionIdentity {
            user_id: "user-1".to_string(),
            username: "ana".to_string(),
            role: Role::SuperAdmin,
        }
    }

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(seconds, 0).single().unwrap_or_default()
    }

    #[test]
    fn issued_token_verifies_before_expiry() -> Result<()> {
        let issued = issue(&identity(), SECRET, at(1_000), 3_600)?;
        assert_eq!(issued.expires_at, at(4_600));
        assert_eq!(verify(&issued.token, SECRET, at(4_599))?, identity());
        Ok(())
    }

    #[test]
    fn token_is_rejected_at_and_after_expiry() -> Result<()> {
        let issued = issue(&identity(), SECRET, at(1_000), 60)?;
        assert!(matches!(
            verify(&issued.token, SECRET, at(1_060)),
            Err(AuthError::Expired { expired_at: 1_060 })
        ));
        assert!(matches!(
            verify(&issued.token, SECRET, at(9_999)),
            Err(AuthError::Expired { .. })
        ));
        Ok(())
    }

    #[test]
    fn wrong_secret_is_rejected() -> Result<()> {
        let issued = issue(&identity(), SECRET, at(1_000), 60)?;
        assert!(matches!(
            verify(&issued.token, "other-secret", at(1_001)),
            Err(AuthError::InvalidSignatureOrFormat { .. })
        ));
        Ok(())
    }

    #[test]
    fn tampering_with_any_byte_denies() -> Result<()> {
        let issued = issue(&identity(), SECRET, at(1_000), 3_600)?;
        let original = issued.token.into_bytes();
        for index in 0..original.len() {
            let mut tampered = original.clone();
            tampered[index] = if tampered[index] == b'A' { b'B' } else { b'A' };
            let token = String::from_utf8_lossy(&tampered).into_owned();
            assert!(
                verify(&token, SECRET, at(1_001)).is_err(),
                "tampered byte {index} still verified"
            );
        }
        Ok(())
    }

    #[test]
    fn garbage_is_invalid_format() {
        assert!(matches!(
            verify("not-a-token", SECRET, at(0)),
            Err(AuthError::InvalidSignatureOrFormat { .. })
        ));
    }

    #[test]
    fn blank_secret_denies() {
        let keys = SessionKeys::new(Some("   "), 60);
        assert!(!keys.is_configured());
        assert!(matches!(
            keys.issue(&identity(), at(0)),
            Err(AuthError::MissingSecret)
        ));
        assert!(matches!(
            keys.verify("anything", at(0)),
            Err(AuthError::MissingSecret)
        ));
    }

    #[test]
    fn keys_round_trip_with_configured_ttl() -> Result<()> {
        let keys = SessionKeys::new(Some(SECRET), DEFAULT_SESSION_TTL_SECS);
        let issued = keys.issue(&identity(), at(50))?;
        assert_eq!(issued.max_age_secs, DEFAULT_SESSION_TTL_SECS);
        assert_eq!(keys.verify(&issued.token, at(51))?.username, "ana");
        assert!(!format!("{keys:?}").contains(SECRET));
        Ok(())
    }
}
