#![forbid(unsafe_code)]
#![deny(unused_must_use, rustdoc::broken_intra_doc_links, rustdoc::bare_urls)]
#![warn(
    missing_docs,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]

//! Telemetry primitives shared across the Mundo workspace.
//!
//! Layout: `init.rs` (subscriber install), `context.rs` (span and request context),
//! `layers.rs` (request id layers), `metrics.rs` (Prometheus registry), `error.rs`.

pub mod context;
pub mod error;
pub mod init;
pub mod layers;
pub mod metrics;

pub use context::{GlobalContextGuard, current_request, with_request_context};
pub use error::{Result as TelemetryResult, TelemetryError};
pub use init::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, build_sha, init_logging};
pub use layers::{propagate_request_id_layer, set_request_id_layer};
pub use metrics::Metrics;
