//! Fallback values applied when a variable is not set.

/// Listener address.
pub const BIND_ADDR: &str = "0.0.0.0";
/// Listener port.
pub const HTTP_PORT: u16 = 3_000;
/// Session credential lifetime in seconds.
pub const SESSION_TTL_SECS: u64 = 3_600;
/// Root folder for locally stored uploads.
pub const UPLOAD_ROOT: &str = "/data/files/uploads";
/// Per-file limit for property and review images.
pub const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;
/// Per-file limit for hero images and videos.
pub const MAX_HERO_BYTES: u64 = 50 * 1024 * 1024;
/// Canonical public URL.
pub const SITE_URL: &str = "https://mundovacacional.com";
/// Messaging number used for inquiry links.
pub const CONTACT_PHONE: &str = "573164032039";
/// Log level when neither `MUNDO_LOG_LEVEL` nor `RUST_LOG` is set.
pub const LOG_LEVEL: &str = "info";
/// Minimum accepted length for a configured signing secret.
pub const MIN_SECRET_LEN: usize = 16;
