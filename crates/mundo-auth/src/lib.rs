#![forbid(unsafe_code)]
#![deny(unused_must_use, rustdoc::broken_intra_doc_links, rustdoc::bare_urls)]
#![warn(
    missing_docs,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]

//! Admin session credentials for the Mundo back office.
//!
//! Layout: `session.rs` (token minting and verification), `identity.rs`
//! (claims and roles), `credential.rs` (cookie/header extraction and the guard
//! decision), `password.rs` (argon2 hashing), `error.rs`.
//!
//! Everything here is synchronous and framework-free; the HTTP layer feeds in
//! raw header values and the current instant.

pub mod credential;
pub mod error;
pub mod identity;
pub mod password;
pub mod session;

pub use credential::{
    Credential, CredentialSource, GuardDecision, SESSION_COOKIE, clear_session_cookie,
    evaluate, extract_credential, session_cookie,
};
pub use error::{AuthError, PasswordError, Result};
pub use identity::{Role, SessionClaims, SessionIdentity};
pub use password::{hash_password, verify_password};
pub use session::{DEFAULT_SESSION_TTL_SECS, IssuedSession, SessionKeys, issue, verify};
