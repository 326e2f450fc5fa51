//! Shared dependencies handed to every handler.

use mundo_auth::SessionKeys;
use mundo_config::{AppConfig, SiteConfig, UploadLimits};
use mundo_data::Repository;
use mundo_media::{Bucket, MediaStore, UploadPolicy};
use mundo_telemetry::Metrics;

/// Application state shared across requests.
pub struct ApiState {
    pub(crate) repo: Repository,
    pub(crate) media: MediaStore,
    pub(crate) sessions: SessionKeys,
    pub(crate) telemetry: Metrics,
    pub(crate) site: SiteConfig,
    pub(crate) uploads: UploadLimits,
    pub(crate) cookie_secure: bool,
}

impl ApiState {
    /// Assemble state from resolved configuration and constructed backends.
    #[must_use]
    pub fn new(config: &AppConfig, repo: Repository, media: MediaStore, telemetry: Metrics) -> Self {
        let secret = config.session.jwt_secret.as_ref().map(|secret| secret.expose());
        Self {
            repo,
            media,
            sessions: SessionKeys::new(secret, config.session.ttl_secs),
            telemetry,
            site: config.site.clone(),
            uploads: config.uploads,
            cookie_secure: config.session.cookie_secure,
        }
    }

    pub(crate) const fn upload_policy(&self, bucket: Bucket) -> UploadPolicy {
        UploadPolicy::for_bucket(
            bucket,
            self.uploads.max_image_bytes,
            self.uploads.max_hero_bytes,
        )
    }
}
