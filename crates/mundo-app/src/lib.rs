#![forbid(unsafe_code)]
#![deny(unused_must_use, rustdoc::broken_intra_doc_links, rustdoc::bare_urls)]
#![warn(
    missing_docs,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]

//! Mundo application bootstrap wiring.
//!
//! Layout: `bootstrap.rs` (boot sequence), `error.rs` (application error).

/// Application bootstrap and environment loading.
pub mod bootstrap;
/// Application-level error type.
pub mod error;

pub use bootstrap::{open_store, run_app, seed_bootstrap_admin};
pub use error::{AppError, AppResult};
