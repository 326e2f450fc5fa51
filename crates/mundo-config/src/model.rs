//! Typed configuration sections.
//!
//! # Design
//! - Pure data carriers assembled once at boot by `loader.rs`.
//! - Secret material is wrapped so it never reaches logs through `Debug`.

use std::fmt::{self, Debug, Formatter};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// String value that must not be printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wrap a secret value.
    #[must_use]
    pub const fn new(value: String) -> Self {
        Self(value)
    }

    /// Borrow the raw value.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Debug for Secret {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

/// Fully resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP listener.
    pub server: ServerConfig,
    /// Admin session settings.
    pub session: SessionConfig,
    /// Persistence locations.
    pub storage: StorageConfig,
    /// Upload size limits.
    pub uploads: UploadLimits,
    /// Public site metadata.
    pub site: SiteConfig,
    /// Admin account seeded when no admin exists yet.
    pub bootstrap_admin: Option<BootstrapAdmin>,
    /// Logging settings.
    pub telemetry: TelemetryConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind.
    pub bind_addr: IpAddr,
    /// Port to bind.
    pub http_port: u16,
}

impl ServerConfig {
    /// Socket address for the listener.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.http_port)
    }
}

/// Admin session settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// HS256 signing secret; login is disabled without it.
    pub jwt_secret: Option<Secret>,
    /// Credential lifetime in seconds.
    pub ttl_secs: u64,
    /// Add the `Secure` attribute to the session cookie.
    pub cookie_secure: bool,
}

/// Persistence locations.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Postgres connection string; the in-memory store is used when absent.
    pub database_url: Option<Secret>,
    /// Root folder for uploaded media.
    pub upload_root: PathBuf,
}

/// Per-file upload limits in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
    /// Limit for property and review images.
    pub max_image_bytes: u64,
    /// Limit for hero images and videos.
    pub max_hero_bytes: u64,
}

/// Public site metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Canonical base URL without a trailing slash.
    pub site_url: String,
    /// Messaging number (digits only) for inquiry links.
    pub contact_phone: String,
}

/// Credentials for the first `super_admin` account.
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    /// Username to create.
    pub username: String,
    /// Initial password.
    pub password: Secret,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Log level directive.
    pub level: String,
    /// Output format name (`json` or `pretty`); inferred when absent.
    pub format: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn secret_debug_is_redacted() {
        let secret = Secret::new("hunter2".to_string());
        assert_eq!(format!("{secret:?}"), "Secret(<redacted>)");
        assert_eq!(secret.expose(), "hunter2");
    }

    #[test]
    fn server_socket_addr_combines_fields() {
        let server = ServerConfig {
            bind_addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
            http_port: 8080,
        };
        assert_eq!(server.socket_addr().to_string(), "127.0.0.1:8080");
    }
}
