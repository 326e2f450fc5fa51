//! Process span and per-request context.
//!
//! The HTTP metrics layer scopes each request's id and matched route into a
//! task-local; guards and handlers read them back for their log lines.

use std::future::Future;
use std::sync::Arc;

use tracing::{Span, span::Entered};

use crate::init::build_sha;

/// Keeps the process span (service name and build sha) entered.
pub struct GlobalContextGuard {
    _guard: Entered<'static>,
}

impl GlobalContextGuard {
    /// Enter the span until the guard drops.
    #[must_use]
    pub fn new(service: impl Into<String>) -> Self {
        let service = service.into();
        let span: &'static Span = Box::leak(Box::new(
            tracing::info_span!("app", service = %service, build_sha = %build_sha()),
        ));
        let guard = span.enter();
        Self { _guard: guard }
    }
}

/// Request id and matched route of the request being served.
///
/// `None` outside [`with_request_context`].
#[must_use]
pub fn current_request() -> Option<(String, String)> {
    ACTIVE_REQUEST
        .try_with(|active| (active.request_id.to_string(), active.route.to_string()))
        .ok()
}

/// Run `fut` with the request id and route visible to [`current_request`].
pub async fn with_request_context<Fut, T>(
    request_id: impl Into<String>,
    route: impl Into<String>,
    fut: Fut,
) -> T
where
    Fut: Future<Output = T>,
{
    let context = RequestContext {
        request_id: Arc::from(request_id.into()),
        route: Arc::from(route.into()),
    };
    ACTIVE_REQUEST.scope(context, fut).await
}

#[derive(Clone)]
struct RequestContext {
    request_id: Arc<str>,
    route: Arc<str>,
}

tokio::task_local! {
    static ACTIVE_REQUEST: RequestContext;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn request_id_is_scoped_to_the_wrapped_future() {
        let seen = with_request_context("req-42", "/api/reviews/{id}", async {
            current_request()
        })
        .await;
        assert_eq!(
            seen,
            Some(("req-42".to_string(), "/api/reviews/{id}".to_string()))
        );
        assert!(current_request().is_none());
    }
}
