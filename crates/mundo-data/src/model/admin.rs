//! Back-office accounts.

use chrono::{DateTime, Utc};
use mundo_auth::Role;
use serde::{Deserialize, Serialize};

use super::default_true;
use crate::document::{Collection, Document, trim_in_place, trim_optional};
use crate::error::{DataError, Result};

/// Minimum username length in characters.
pub const USERNAME_MIN: usize = 3;
/// Minimum password length in characters.
pub const PASSWORD_MIN: usize = 6;

/// A stored admin account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    /// Identifier.
    pub id: String,
    /// Unique login name.
    pub username: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    /// Contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Access level.
    #[serde(default)]
    pub role: Role,
    /// May sign in.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Most recent successful login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last modification instant.
    pub updated_at: DateTime<Utc>,
}

impl AdminUser {
    /// Public projection without the password hash.
    #[must_use]
    pub fn view(&self) -> AdminUserView {
        AdminUserView {
            id: self.id.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role,
            is_active: self.is_active,
            last_login: self.last_login,
            created_at: self.created_at,
        }
    }
}

impl Document for AdminUser {
    const COLLECTION: Collection = Collection::AdminUsers;
    const LOCKED_FIELDS: &'static [&'static str] = &["username", "password_hash"];

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn normalize(&mut self) {
        trim_in_place(&mut self.username);
        trim_optional(&mut self.email);
    }

    fn validate(&self) -> Result<()> {
        if self.username.chars().count() < USERNAME_MIN {
            return Err(DataError::invalid("username", "too_short"));
        }
        if self.password_hash.is_empty() {
            return Err(DataError::invalid("password", "required"));
        }
        Ok(())
    }
}

/// Admin account as exposed over the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminUserView {
    /// Identifier.
    pub id: String,
    /// Login name.
    pub username: String,
    /// Contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Access level.
    pub role: Role,
    /// May sign in.
    pub is_active: bool,
    /// Most recent successful login.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
}

/// Payload for creating an admin account.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAdminUser {
    /// Login name.
    pub username: String,
    /// Plain-text password; hashed before storage.
    pub password: String,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Access level.
    #[serde(default)]
    pub role: Role,
}

impl NewAdminUser {
    /// Check the plain-text constraints that cannot be verified after hashing.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Invalid`] for a short username or password.
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().chars().count() < USERNAME_MIN {
            return Err(DataError::invalid("username", "too_short"));
        }
        if self.password.chars().count() < PASSWORD_MIN {
            return Err(DataError::invalid("password", "too_short"));
        }
        Ok(())
    }

    /// Build the stored document around an already computed hash.
    #[must_use]
    pub fn into_document(self, id: String, password_hash: String, now: DateTime<Utc>) -> AdminUser {
        AdminUser {
            id,
            username: self.username,
            password_hash,
            email: self.email,
            role: self.role,
            is_active: true,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_omits_password_hash() -> std::result::Result<(), serde_json::Error> {
        let user = NewAdminUser {
            username: "owner".to_string(),
            password: "secret1".to_string(),
            email: None,
            role: Role::SuperAdmin,
        }
        .into_document("a1".to_string(), "$argon2id$stub".to_string(), Utc::now());
        let rendered = serde_json::to_value(user.view())?;
        assert!(rendered.get("password_hash").is_none());
        assert_eq!(rendered["role"], "super_admin");
        Ok(())
    }

    #[test]
    fn new_admin_constraints() {
        let short = NewAdminUser {
            username: "ab".to_string(),
            password: "secret1".to_string(),
            email: None,
            role: Role::Admin,
        };
        assert!(matches!(
            short.validate(),
            Err(DataError::Invalid { field: "username", .. })
        ));
        let weak = NewAdminUser {
            username: "abc".to_string(),
            password: "12345".to_string(),
            email: None,
            role: Role::Admin,
        };
        assert!(matches!(
            weak.validate(),
            Err(DataError::Invalid { field: "password", .. })
        ));
    }
}
