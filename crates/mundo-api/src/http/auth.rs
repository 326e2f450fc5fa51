//! Session guards for the HTTP layer.
//!
//! API routes answer a denied request with a `401` problem document; admin
//! pages redirect to the login page. Both purge the stored cookie when the
//! credential was present but unusable.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{
        HeaderMap, HeaderValue, Request,
        header::{AUTHORIZATION, COOKIE, SET_COOKIE},
    },
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use mundo_auth::{AuthError, GuardDecision, SessionIdentity, clear_session_cookie, evaluate};
use mundo_telemetry::current_request;
use tracing::{debug, warn};

use crate::http::constants::LOGIN_PAGE;
use crate::http::errors::ApiError;
use crate::state::ApiState;

/// Outcome of checking the session headers, with denials already recorded.
enum SessionCheck {
    Allowed(SessionIdentity),
    Denied { clear_cookie: bool },
}

fn check_session(state: &ApiState, headers: &HeaderMap) -> SessionCheck {
    let cookie = cookie_header(headers);
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    match evaluate(&state.sessions, cookie.as_deref(), authorization, Utc::now()) {
        GuardDecision::Proceed(identity) => {
            debug!(user_id = %identity.user_id, "session accepted");
            SessionCheck::Allowed(identity)
        }
        GuardDecision::Deny {
            reason,
            clear_cookie,
        } => {
            state.telemetry.inc_session_denial(reason.reason());
            let (request_id, route) = current_request().unwrap_or_default();
            if matches!(reason, AuthError::NoCredential) {
                debug!(%request_id, %route, "request carried no session credential");
            } else {
                warn!(
                    %request_id,
                    %route,
                    reason = reason.reason(),
                    clear_cookie,
                    "session rejected"
                );
            }
            SessionCheck::Denied { clear_cookie }
        }
    }
}

/// Every `Cookie` header joined into one list; HTTP/2 clients may send several.
fn cookie_header(headers: &HeaderMap) -> Option<String> {
    let parts: Vec<&str> = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect();
    (!parts.is_empty()).then(|| parts.join("; "))
}

/// Guard for API routes: attaches the identity or answers `401`.
pub(crate) async fn require_session(
    State(state): State<Arc<ApiState>>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    match check_session(&state, req.headers()) {
        SessionCheck::Allowed(identity) => {
            req.extensions_mut().insert(identity);
            Ok(next.run(req).await)
        }
        SessionCheck::Denied { clear_cookie } => {
            let err = ApiError::unauthorized("a valid admin session is required");
            Err(if clear_cookie {
                err.with_cookie(clear_session_cookie(state.cookie_secure))
            } else {
                err
            })
        }
    }
}

/// Guard for admin pages: attaches the identity or redirects to the login page.
pub(crate) async fn require_page_session(
    State(state): State<Arc<ApiState>>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Response {
    match check_session(&state, req.headers()) {
        SessionCheck::Allowed(identity) => {
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        SessionCheck::Denied { clear_cookie } => {
            let mut response = Redirect::to(LOGIN_PAGE).into_response();
            if clear_cookie
                && let Ok(value) = HeaderValue::from_str(&clear_session_cookie(state.cookie_secure))
            {
                response.headers_mut().insert(SET_COOKIE, value);
            }
            response
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_header_joins_split_headers() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(COOKIE, HeaderValue::from_static("admin-token=abc"));
        assert_eq!(
            cookie_header(&headers).as_deref(),
            Some("theme=dark; admin-token=abc")
        );
        assert!(cookie_header(&HeaderMap::new()).is_none());
    }
}
