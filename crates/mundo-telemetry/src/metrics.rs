//! Prometheus-backed metrics registry and snapshot helpers.
//!
//! # Design
//! - Encapsulates collector registration to keep the public API small.
//! - Counters cover HTTP traffic, session guard denials, login attempts, and content writes.

use std::sync::Arc;

use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};
use serde::Serialize;

use crate::error::{Result, TelemetryError};

/// Prometheus-backed metrics registry shared across services.
#[derive(Clone)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

struct MetricsInner {
    registry: Registry,
    http_requests_total: IntCounterVec,
    session_denials_total: IntCounterVec,
    login_attempts_total: IntCounterVec,
    content_writes_total: IntCounterVec,
}

/// Snapshot of selected counters for health reporting.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    /// Requests rejected by the session guard.
    pub session_denials_total: u64,
    /// Successful logins.
    pub logins_succeeded_total: u64,
    /// Failed logins.
    pub logins_failed_total: u64,
}

impl Metrics {
    /// Construct a new metrics registry with the standard collectors registered.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the Prometheus collectors cannot be built or registered.
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let http_requests_total = counter_vec(
            "http_requests_total",
            "Total HTTP requests received",
            &["route", "code"],
        )?;
        let session_denials_total = counter_vec(
            "session_denials_total",
            "Requests rejected by the admin session guard",
            &["reason"],
        )?;
        let login_attempts_total = counter_vec(
            "login_attempts_total",
            "Admin login attempts by outcome",
            &["outcome"],
        )?;
        let content_writes_total = counter_vec(
            "content_writes_total",
            "Content documents written by kind and action",
            &["document", "action"],
        )?;

        register(&registry, "http_requests_total", &http_requests_total)?;
        register(&registry, "session_denials_total", &session_denials_total)?;
        register(&registry, "login_attempts_total", &login_attempts_total)?;
        register(&registry, "content_writes_total", &content_writes_total)?;

        Ok(Self {
            inner: Arc::new(MetricsInner {
                registry,
                http_requests_total,
                session_denials_total,
                login_attempts_total,
                content_writes_total,
            }),
        })
    }

    /// Increment the HTTP request counter for the given route and status code.
    pub fn inc_http_request(&self, route: &str, status: u16) {
        self.inner
            .http_requests_total
            .with_label_values(&[route, &status.to_string()])
            .inc();
    }

    /// Increment the session denial counter for the given reason label.
    pub fn inc_session_denial(&self, reason: &str) {
        self.inner
            .session_denials_total
            .with_label_values(&[reason])
            .inc();
    }

    /// Record a login attempt outcome (`success` or `failure`).
    pub fn inc_login_attempt(&self, success: bool) {
        let outcome = if success { "success" } else { "failure" };
        self.inner
            .login_attempts_total
            .with_label_values(&[outcome])
            .inc();
    }

    /// Record a content write (`create`, `update`, `delete`) for a document kind.
    pub fn inc_content_write(&self, document: &str, action: &str) {
        self.inner
            .content_writes_total
            .with_label_values(&[document, action])
            .inc();
    }

    /// Render the metrics registry using the Prometheus text exposition format.
    ///
    /// # Errors
    ///
    /// Returns an error if the metrics cannot be encoded or if the encoded
    /// buffer is not valid UTF-8.
    pub fn render(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.inner.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|source| TelemetryError::MetricsEncode { source })?;
        String::from_utf8(buffer).map_err(|source| TelemetryError::MetricsUtf8 { source })
    }

    /// Take a point-in-time snapshot of the session-related counters.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        let denials = self
            .inner
            .session_denials_total
            .with_label_values(&["no_credential"])
            .get()
            + self
                .inner
                .session_denials_total
                .with_label_values(&["invalid"])
                .get()
            + self
                .inner
                .session_denials_total
                .with_label_values(&["expired"])
                .get()
            + self
                .inner
                .session_denials_total
                .with_label_values(&["missing_secret"])
                .get();
        MetricsSnapshot {
            session_denials_total: denials,
            logins_succeeded_total: self
                .inner
                .login_attempts_total
                .with_label_values(&["success"])
                .get(),
            logins_failed_total: self
                .inner
                .login_attempts_total
                .with_label_values(&["failure"])
                .get(),
        }
    }
}

fn counter_vec(name: &'static str, help: &str, labels: &[&str]) -> Result<IntCounterVec> {
    IntCounterVec::new(Opts::new(name, help), labels)
        .map_err(|source| TelemetryError::MetricsCollector { name, source })
}

fn register(registry: &Registry, name: &'static str, collector: &IntCounterVec) -> Result<()> {
    registry
        .register(Box::new(collector.clone()))
        .map_err(|source| TelemetryError::MetricsRegister { name, source })
}
