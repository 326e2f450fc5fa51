//! Argon2 password hashing for admin accounts.

use argon2::Argon2;
use argon2::password_hash::{
    Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    rand_core::OsRng,
};

use crate::error::PasswordError;

/// Hash a password into a PHC string.
///
/// # Errors
///
/// Returns [`PasswordError::Hash`] if argon2 rejects the input.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|detail| PasswordError::Hash { detail })?;
    Ok(hash.to_string())
}

/// Check `candidate` against a stored PHC hash. A mismatch is `Ok(false)`.
///
/// # Errors
///
/// Returns an error if the stored hash cannot be parsed or verification fails
/// for a reason other than a mismatch.
pub fn verify_password(stored_hash: &str, candidate: &str) -> Result<bool, PasswordError> {
    let parsed =
        PasswordHash::new(stored_hash).map_err(|detail| PasswordError::StoredHashInvalid { detail })?;
    match Argon2::default().verify_password(candidate.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(PasswordHashError::Password) => Ok(false),
        Err(detail) => Err(PasswordError::Verify { detail }),
    }
}
