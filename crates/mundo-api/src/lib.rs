#![forbid(unsafe_code)]
#![deny(unused_must_use, rustdoc::broken_intra_doc_links, rustdoc::bare_urls)]
#![warn(
    missing_docs,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]

//! HTTP API for the Mundo site.
//!
//! Layout: `http/router.rs` (route table and server), `http/auth.rs` (session
//! guards), `http/handlers/` (one module per resource), `http/errors.rs`
//! (problem responses), `state.rs` (shared dependencies), `models.rs` (wire
//! types).

pub mod error;
pub mod http;
pub mod models;
pub mod state;


pub use error::{ApiServerError, ApiServerResult};
pub use http::router::ApiServer;
pub use models::{ProblemDetails, ProblemInvalidParam};
pub use state::ApiState;
