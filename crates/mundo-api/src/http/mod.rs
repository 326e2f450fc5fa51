//! HTTP surface modules (router, guards, handlers).

/// Session guards for API routes and admin pages.
pub mod auth;
/// Shared constants and header names.
pub mod constants;
/// Problem response helpers and error types.
pub mod errors;
/// Route handlers grouped by resource.
pub mod handlers;
/// Router construction and server host.
pub mod router;
/// Metrics middleware for HTTP requests.
pub mod telemetry;
