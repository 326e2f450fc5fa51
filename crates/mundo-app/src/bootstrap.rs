//! # Design
//!
//! - Boot order: configuration, logging, metrics, content store, upload folders,
//!   bootstrap admin, then the HTTP listener.
//! - Without a database URL the process keeps content in memory and says so loudly.
//! - The bootstrap admin is only created while the account table is empty.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mundo_api::{ApiServer, ApiState};
use mundo_auth::{Role, hash_password};
use mundo_config::{AppConfig, BootstrapAdmin, load_from_env};
use mundo_data::{MemoryStore, NewAdminUser, PgStore, Repository};
use mundo_media::MediaStore;
use mundo_telemetry::{
    GlobalContextGuard, LogFormat, LoggingConfig, Metrics, build_sha, init_logging,
};
use tracing::{info, warn};

use crate::error::{AppError, AppResult};

const SERVICE_NAME: &str = "mundo-app";
const MAX_DB_CONNECTIONS: u32 = 10;

/// Dependencies required to bootstrap the application.
pub(crate) struct BootstrapDependencies {
    config: AppConfig,
    telemetry: Metrics,
}

impl BootstrapDependencies {
    /// Build bootstrap dependencies from environment configuration.
    pub(crate) fn from_env() -> AppResult<Self> {
        let config = load_from_env().map_err(|err| AppError::config("config.load", err))?;
        let telemetry =
            Metrics::new().map_err(|err| AppError::telemetry("telemetry.metrics", err))?;
        Ok(Self { config, telemetry })
    }
}

/// Bootstrap the application and block until the HTTP listener exits.
///
/// # Errors
///
/// Returns an error when configuration, logging, storage, or the listener fails.
pub async fn run_app() -> AppResult<()> {
    let dependencies = BootstrapDependencies::from_env()?;
    run_app_with(dependencies).await
}

pub(crate) async fn run_app_with(dependencies: BootstrapDependencies) -> AppResult<()> {
    let BootstrapDependencies { config, telemetry } = dependencies;

    let format = config
        .telemetry
        .format
        .as_deref()
        .map_or_else(LogFormat::infer, LogFormat::from_name);
    init_logging(&LoggingConfig {
        level: &config.telemetry.level,
        format,
        build_sha: build_sha(),
    })
    .map_err(|err| AppError::telemetry("logging.init", err))?;
    let _context = GlobalContextGuard::new(SERVICE_NAME);

    info!(
        bind = %config.server.socket_addr(),
        upload_root = %config.storage.upload_root.display(),
        "bootstrapping mundo"
    );
    if config.session.jwt_secret.is_none() {
        warn!("session secret not configured; admin login is disabled");
    }

    let repo = open_store(&config).await?;
    seed_bootstrap_admin(&repo, config.bootstrap_admin.as_ref(), Utc::now()).await?;

    let media = MediaStore::new(config.storage.upload_root.clone());
    media
        .ensure_buckets()
        .await
        .map_err(|err| AppError::media("media.ensure_buckets", err))?;

    let state = ApiState::new(&config, repo, media, telemetry);
    let addr = config.server.socket_addr();
    info!(%addr, "starting HTTP listener");
    ApiServer::new(state)
        .serve(addr)
        .await
        .map_err(|err| AppError::api_server("api_server.serve", err))
}

/// Open the configured content store.
///
/// Connects to `PostgreSQL` when a database URL is configured and falls back to
/// an in-memory store otherwise.
///
/// # Errors
///
/// Returns an error when the database connection or migrations fail.
pub async fn open_store(config: &AppConfig) -> AppResult<Repository> {
    match &config.storage.database_url {
        Some(url) => {
            let store = PgStore::connect(url.expose(), MAX_DB_CONNECTIONS)
                .await
                .map_err(|err| AppError::data("store.connect", err))?;
            info!(backend = "postgres", "content store ready");
            Ok(Repository::new(Arc::new(store)))
        }
        None => {
            warn!("DATABASE_URL not set; content is kept in memory and lost on restart");
            Ok(Repository::new(Arc::new(MemoryStore::new())))
        }
    }
}

/// Create the configured super admin when no accounts exist yet.
///
/// Returns `true` when an account was created.
///
/// # Errors
///
/// Returns an error when the account lookup, hashing, or insert fails.
pub async fn seed_bootstrap_admin(
    repo: &Repository,
    admin: Option<&BootstrapAdmin>,
    now: DateTime<Utc>,
) -> AppResult<bool> {
    let Some(admin) = admin else {
        return Ok(false);
    };
    let existing = repo
        .admin_count()
        .await
        .map_err(|err| AppError::data("bootstrap_admin.count", err))?;
    if existing > 0 {
        info!(existing, "admin accounts present; skipping bootstrap admin");
        return Ok(false);
    }

    let new_admin = NewAdminUser {
        username: admin.username.clone(),
        password: admin.password.expose().to_string(),
        email: None,
        role: Role::SuperAdmin,
    };
    new_admin
        .validate()
        .map_err(|err| AppError::data("bootstrap_admin.validate", err))?;
    let password_hash = hash_password(admin.password.expose())
        .map_err(|err| AppError::password("bootstrap_admin.hash", err))?;
    let created = repo
        .create_admin(new_admin, password_hash, now)
        .await
        .map_err(|err| AppError::data("bootstrap_admin.create", err))?;
    info!(username = %created.username, "bootstrap super admin created");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use mundo_auth::verify_password;
    use mundo_config::{Secret, load_from_lookup};

    fn memory_repo() -> Repository {
        Repository::new(Arc::new(MemoryStore::new()))
    }

    fn bootstrap(username: &str, password: &str) -> BootstrapAdmin {
        BootstrapAdmin {
            username: username.to_string(),
            password: Secret::new(password.to_string()),
        }
    }

    #[tokio::test]
    async fn seeds_super_admin_into_empty_store() -> Result<()> {
        let repo = memory_repo();
        let admin = bootstrap("owner", "changeme");

        assert!(seed_bootstrap_admin(&repo, Some(&admin), Utc::now()).await?);

        let stored = repo
            .find_admin_by_username("owner")
            .await?
            .ok_or_else(|| anyhow::anyhow!("bootstrap admin missing"))?;
        assert_eq!(stored.role, Role::SuperAdmin);
        assert!(stored.is_active);
        assert!(verify_password(&stored.password_hash, "changeme")?);
        Ok(())
    }

    #[tokio::test]
    async fn seeding_is_skipped_once_accounts_exist() -> Result<()> {
        let repo = memory_repo();
        let admin = bootstrap("owner", "changeme");
        assert!(seed_bootstrap_admin(&repo, Some(&admin), Utc::now()).await?);

        let other = bootstrap("second", "changeme");
        assert!(!seed_bootstrap_admin(&repo, Some(&other), Utc::now()).await?);
        assert_eq!(repo.admin_count().await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn seeding_without_configuration_is_a_no_op() -> Result<()> {
        let repo = memory_repo();
        assert!(!seed_bootstrap_admin(&repo, None, Utc::now()).await?);
        assert_eq!(repo.admin_count().await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn short_bootstrap_password_is_rejected() -> Result<()> {
        let repo = memory_repo();
        let admin = bootstrap("owner", "abc");
        let err = seed_bootstrap_admin(&repo, Some(&admin), Utc::now())
            .await
            .err()
            .ok_or_else(|| anyhow::anyhow!("expected validation failure"))?;
        assert!(matches!(
            err,
            AppError::Data {
                operation: "bootstrap_admin.validate",
                ..
            }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn open_store_falls_back_to_memory() -> Result<()> {
        let config = load_from_lookup(|_| None)?;
        let repo = open_store(&config).await?;
        assert_eq!(repo.backend(), "memory");
        Ok(())
    }
}
