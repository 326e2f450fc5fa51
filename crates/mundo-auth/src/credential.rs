//! Credential extraction and the guard decision for protected requests.
//!
//! The HTTP layer hands over the raw `Cookie` and `Authorization` header
//! values; [`evaluate`] decides whether the request proceeds and whether the
//! stored cookie has to be purged.

use chrono::{DateTime, Utc};

use crate::error::AuthError;
use crate::identity::SessionIdentity;
use crate::session::SessionKeys;

/// Name of the cookie that carries the session credential.
pub const SESSION_COOKIE: &str = "admin-token";

/// Where a credential was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// The `admin-token` cookie.
    Cookie,
    /// An `Authorization: Bearer` header.
    Bearer,
}

/// A credential presented by a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    /// Raw token text.
    pub token: String,
    /// Where it was found.
    pub source: CredentialSource,
}

/// Outcome of running the guard over a request.
#[derive(Debug)]
pub enum GuardDecision {
    /// Let the request through with the verified identity.
    Proceed(SessionIdentity),
    /// Reject the request.
    Deny {
        /// Why the request was rejected.
        reason: AuthError,
        /// Whether the response should expire the stored cookie.
        clear_cookie: bool,
    },
}

/// Pull the credential out of the request headers. The cookie wins over the header.
#[must_use]
pub fn extract_credential(cookie_header: Option<&str>, authorization: Option<&str>) -> Option<Credential> {
    cookie_header
        .and_then(cookie_value)
        .map(|token| Credential {
            token,
            source: CredentialSource::Cookie,
        })
        .or_else(|| {
            authorization.and_then(bearer_value).map(|token| Credential {
                token,
                source: CredentialSource::Bearer,
            })
        })
}

/// Decide whether a request carrying these headers may proceed at `now`.
#[must_use]
pub fn evaluate(
    keys: &SessionKeys,
    cookie_header: Option<&str>,
    authorization: Option<&str>,
    now: DateTime<Utc>,
) -> GuardDecision {
    let Some(credential) = extract_credential(cookie_header, authorization) else {
        return GuardDecision::Deny {
            reason: AuthError::NoCredential,
            clear_cookie: false,
        };
    };
    match keys.verify(&credential.token, now) {
        Ok(identity) => GuardDecision::Proceed(identity),
        Err(reason) => {
            let clear_cookie = reason.clears_cookie();
            GuardDecision::Deny {
                reason,
                clear_cookie,
            }
        }
    }
}

/// `Set-Cookie` value that stores a freshly minted credential.
#[must_use]
pub fn session_cookie(token: &str, max_age_secs: u64, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Strict; Max-Age={max_age_secs}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that expires the stored credential.
#[must_use]
pub fn clear_session_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}

fn cookie_value(header: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().trim_matches('"'))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn bearer_value(header: &str) -> Option<String> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}
