//! Identity payload carried inside session credentials.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Access level of an admin account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Manages content.
    #[default]
    Admin,
    /// Manages content and other admin accounts.
    SuperAdmin,
}

impl Role {
    /// Wire representation of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }

    /// Whether the role may create or delete admin accounts.
    #[must_use]
    pub const fn manages_users(self) -> bool {
        matches!(self, Self::SuperAdmin)
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "super_admin" => Ok(Self::SuperAdmin),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

/// Identity attached to an authenticated request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    /// Admin user identifier.
    pub user_id: String,
    /// Display name.
    pub username: String,
    /// Access level.
    pub role: Role,
}

/// Registered and private claims encoded in the token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Admin user identifier.
    pub sub: String,
    /// Display name.
    pub username: String,
    /// Access level.
    pub role: Role,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

impl SessionClaims {
    pub(crate) fn into_identity(self) -> SessionIdentity {
        SessionIdentity {
            user_id: self.sub,
            username: self.username,
            role: self.role,
        }
    }
}
