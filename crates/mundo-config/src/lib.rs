#![forbid(unsafe_code)]
#![deny(unused_must_use, rustdoc::broken_intra_doc_links, rustdoc::bare_urls)]
#![warn(
    missing_docs,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]

//! Environment-driven configuration for the Mundo site.
//!
//! Layout: `model.rs` (typed config sections), `loader.rs` (environment
//! lookup and assembly), `validate.rs` (parsing helpers), `defaults.rs`
//! (fallback values), `error.rs`.

pub mod defaults;
pub mod error;
pub mod loader;
pub mod model;
mod validate;

pub use error::{ConfigError, ConfigResult};
pub use loader::{load_from_env, load_from_lookup};
pub use model::{
    AppConfig, BootstrapAdmin, Secret, ServerConfig, SessionConfig, SiteConfig, StorageConfig,
    TelemetryConfig, UploadLimits,
};
