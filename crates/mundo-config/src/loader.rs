//! Assemble [`AppConfig`] from environment variables.
//!
//! # Design
//! - Reads go through an injectable lookup so tests never touch process state.
//! - Blank values count as unset.

use std::net::IpAddr;
use std::path::PathBuf;

use tracing::warn;

use crate::defaults;
use crate::error::{ConfigError, ConfigResult};
use crate::model::{
    AppConfig, BootstrapAdmin, Secret, ServerConfig, SessionConfig, SiteConfig, StorageConfig,
    TelemetryConfig, UploadLimits,
};
use crate::validate::{
    parse_bind_addr, parse_bool, parse_phone, parse_port, parse_positive_u64, parse_site_url,
};

/// Listener address variable.
pub const ENV_BIND_ADDR: &str = "MUNDO_BIND_ADDR";
/// Listener port variable.
pub const ENV_HTTP_PORT: &str = "MUNDO_HTTP_PORT";
/// Session signing secret variable.
pub const ENV_JWT_SECRET: &str = "MUNDO_JWT_SECRET";
/// Session lifetime variable.
pub const ENV_SESSION_TTL_SECS: &str = "MUNDO_SESSION_TTL_SECS";
/// Secure-cookie toggle variable.
pub const ENV_COOKIE_SECURE: &str = "MUNDO_COOKIE_SECURE";
/// Postgres connection string variable.
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
/// Upload root variable.
pub const ENV_UPLOAD_ROOT: &str = "MUNDO_UPLOAD_ROOT";
/// Image size limit variable.
pub const ENV_MAX_IMAGE_BYTES: &str = "MUNDO_MAX_IMAGE_BYTES";
/// Hero media size limit variable.
pub const ENV_MAX_HERO_BYTES: &str = "MUNDO_MAX_HERO_BYTES";
/// Canonical URL variable.
pub const ENV_SITE_URL: &str = "MUNDO_SITE_URL";
/// Messaging number variable.
pub const ENV_CONTACT_PHONE: &str = "MUNDO_CONTACT_PHONE";
/// Bootstrap admin username variable.
pub const ENV_BOOTSTRAP_USERNAME: &str = "MUNDO_BOOTSTRAP_ADMIN_USERNAME";
/// Bootstrap admin password variable.
pub const ENV_BOOTSTRAP_PASSWORD: &str = "MUNDO_BOOTSTRAP_ADMIN_PASSWORD";
/// Log level variable.
pub const ENV_LOG_LEVEL: &str = "MUNDO_LOG_LEVEL";
/// Log format variable.
pub const ENV_LOG_FORMAT: &str = "MUNDO_LOG_FORMAT";

/// Load configuration from the process environment.
///
/// # Errors
///
/// Returns [`ConfigError`] when a variable is set to an unparseable value.
pub fn load_from_env() -> ConfigResult<AppConfig> {
    load_from_lookup(|key| std::env::var(key).ok())
}

/// Load configuration through `lookup`.
///
/// # Errors
///
/// Returns [`ConfigError`] when a variable is set to an unparseable value.
pub fn load_from_lookup<F>(lookup: F) -> ConfigResult<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| {
        lookup(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    };

    let server = ServerConfig {
        bind_addr: match get(ENV_BIND_ADDR) {
            Some(raw) => parse_bind_addr(ENV_BIND_ADDR, &raw)?,
            None => defaults::BIND_ADDR
                .parse::<IpAddr>()
                .map_err(|_| ConfigError::invalid(ENV_BIND_ADDR, defaults::BIND_ADDR, "must be an IP address"))?,
        },
        http_port: get(ENV_HTTP_PORT)
            .map(|raw| parse_port(ENV_HTTP_PORT, &raw))
            .transpose()?
            .unwrap_or(defaults::HTTP_PORT),
    };

    let jwt_secret = get(ENV_JWT_SECRET).map(Secret::new);
    match &jwt_secret {
        None => warn!(variable = ENV_JWT_SECRET, "session secret not set; admin login disabled"),
        Some(secret) if secret.expose().len() < defaults::MIN_SECRET_LEN => {
            warn!(
                variable = ENV_JWT_SECRET,
                min_len = defaults::MIN_SECRET_LEN,
                "session secret is shorter than recommended"
            );
        }
        Some(_) => {}
    }
    let session = SessionConfig {
        jwt_secret,
        ttl_secs: get(ENV_SESSION_TTL_SECS)
            .map(|raw| parse_positive_u64(ENV_SESSION_TTL_SECS, &raw))
            .transpose()?
            .unwrap_or(defaults::SESSION_TTL_SECS),
        cookie_secure: get(ENV_COOKIE_SECURE)
            .map(|raw| parse_bool(ENV_COOKIE_SECURE, &raw))
            .transpose()?
            .unwrap_or(false),
    };

    let storage = StorageConfig {
        database_url: get(ENV_DATABASE_URL).map(Secret::new),
        upload_root: PathBuf::from(
            get(ENV_UPLOAD_ROOT).unwrap_or_else(|| defaults::UPLOAD_ROOT.to_string()),
        ),
    };

    let uploads = UploadLimits {
        max_image_bytes: get(ENV_MAX_IMAGE_BYTES)
            .map(|raw| parse_positive_u64(ENV_MAX_IMAGE_BYTES, &raw))
            .transpose()?
            .unwrap_or(defaults::MAX_IMAGE_BYTES),
        max_hero_bytes: get(ENV_MAX_HERO_BYTES)
            .map(|raw| parse_positive_u64(ENV_MAX_HERO_BYTES, &raw))
            .transpose()?
            .unwrap_or(defaults::MAX_HERO_BYTES),
    };

    let site = SiteConfig {
        site_url: match get(ENV_SITE_URL) {
            Some(raw) => parse_site_url(ENV_SITE_URL, &raw)?,
            None => defaults::SITE_URL.to_string(),
        },
        contact_phone: match get(ENV_CONTACT_PHONE) {
            Some(raw) => parse_phone(ENV_CONTACT_PHONE, &raw)?,
            None => defaults::CONTACT_PHONE.to_string(),
        },
    };

    let bootstrap_admin = match (get(ENV_BOOTSTRAP_USERNAME), get(ENV_BOOTSTRAP_PASSWORD)) {
        (Some(username), Some(password)) => {
            if username.chars().count() < 3 {
                return Err(ConfigError::invalid(
                    ENV_BOOTSTRAP_USERNAME,
                    &username,
                    "must be at least 3 characters",
                ));
            }
            if password.chars().count() < 6 {
                return Err(ConfigError::invalid_redacted(
                    ENV_BOOTSTRAP_PASSWORD,
                    "must be at least 6 characters",
                ));
            }
            Some(BootstrapAdmin {
                username,
                password: Secret::new(password),
            })
        }
        (Some(_), None) => {
            return Err(ConfigError::IncompletePair {
                present: ENV_BOOTSTRAP_USERNAME,
                missing: ENV_BOOTSTRAP_PASSWORD,
            });
        }
        (None, Some(_)) => {
            return Err(ConfigError::IncompletePair {
                present: ENV_BOOTSTRAP_PASSWORD,
                missing: ENV_BOOTSTRAP_USERNAME,
            });
        }
        (None, None) => None,
    };

    let telemetry = TelemetryConfig {
        level: get(ENV_LOG_LEVEL).unwrap_or_else(|| defaults::LOG_LEVEL.to_string()),
        format: get(ENV_LOG_FORMAT),
    };

    Ok(AppConfig {
        server,
        session,
        storage,
        uploads,
        site,
        bootstrap_admin,
        telemetry,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() -> ConfigResult<()> {
        let config = load_from_lookup(lookup(&[]))?;
        assert_eq!(config.server.socket_addr().to_string(), "0.0.0.0:3000");
        assert!(config.session.jwt_secret.is_none());
        assert_eq!(config.session.ttl_secs, 3_600);
        assert!(!config.session.cookie_secure);
        assert!(config.storage.database_url.is_none());
        assert_eq!(config.storage.upload_root, PathBuf::from("/data/files/uploads"));
        assert_eq!(config.uploads.max_image_bytes, 10 * 1024 * 1024);
        assert_eq!(config.uploads.max_hero_bytes, 50 * 1024 * 1024);
        assert_eq!(config.site.site_url, "https://mundovacacional.com");
        assert_eq!(config.site.contact_phone, "573164032039");
        assert!(config.bootstrap_admin.is_none());
        assert_eq!(config.telemetry.level, "info");
        Ok(())
    }

    #[test]
    fn overrides_are_parsed() -> ConfigResult<()> {
        let config = load_from_lookup(lookup(&[
            (ENV_BIND_ADDR, "127.0.0.1"),
            (ENV_HTTP_PORT, "8080"),
            (ENV_JWT_SECRET, "a-very-long-signing-secret"),
            (ENV_SESSION_TTL_SECS, "600"),
            (ENV_COOKIE_SECURE, "true"),
            (ENV_UPLOAD_ROOT, "/tmp/uploads"),
            (ENV_SITE_URL, "https://staging.example.com/"),
            (ENV_BOOTSTRAP_USERNAME, "owner"),
            (ENV_BOOTSTRAP_PASSWORD, "changeme"),
            (ENV_LOG_FORMAT, "json"),
        ]))?;
        assert_eq!(config.server.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(
            config.session.jwt_secret.as_ref().map(Secret::expose),
            Some("a-very-long-signing-secret")
        );
        assert_eq!(config.session.ttl_secs, 600);
        assert!(config.session.cookie_secure);
        assert_eq!(config.site.site_url, "https://staging.example.com");
        assert_eq!(
            config.bootstrap_admin.as_ref().map(|admin| admin.username.as_str()),
            Some("owner")
        );
        assert_eq!(config.telemetry.format.as_deref(), Some("json"));
        Ok(())
    }

    #[test]
    fn blank_values_count_as_unset() -> ConfigResult<()> {
        let config = load_from_lookup(lookup(&[(ENV_JWT_SECRET, "   "), (ENV_HTTP_PORT, "")]))?;
        assert!(config.session.jwt_secret.is_none());
        assert_eq!(config.server.http_port, 3_000);
        Ok(())
    }

    #[test]
    fn invalid_values_report_the_field() {
        let err = load_from_lookup(lookup(&[(ENV_HTTP_PORT, "0")]));
        assert!(matches!(
            err,
            Err(ConfigError::InvalidField {
                field: ENV_HTTP_PORT,
                ..
            })
        ));
        let err = load_from_lookup(lookup(&[(ENV_SESSION_TTL_SECS, "soon")]));
        assert!(matches!(
            err,
            Err(ConfigError::InvalidField {
                field: ENV_SESSION_TTL_SECS,
                ..
            })
        ));
    }

    #[test]
    fn bootstrap_admin_requires_both_halves() {
        assert!(matches!(
            load_from_lookup(lookup(&[(ENV_BOOTSTRAP_USERNAME, "owner")])),
            Err(ConfigError::IncompletePair { .. })
        ));
        assert!(matches!(
            load_from_lookup(lookup(&[
                (ENV_BOOTSTRAP_USERNAME, "owner"),
                (ENV_BOOTSTRAP_PASSWORD, "123"),
            ])),
            Err(ConfigError::InvalidField { value: None, .. })
        ));
    }
}
