#![forbid(unsafe_code)]
#![deny(unused_must_use, rustdoc::broken_intra_doc_links, rustdoc::bare_urls)]
#![warn(
    missing_docs,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]

//! Binary entrypoint for the Mundo site back end.

use mundo_app::{AppResult, run_app};

/// Boots the application and blocks until the listener stops.
#[tokio::main]
async fn main() -> AppResult<()> {
    run_app().await
}
