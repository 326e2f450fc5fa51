//! Login, logout, and session verification.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderValue, header::SET_COOKIE},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use mundo_auth::{SessionIdentity, clear_session_cookie, session_cookie, verify_password};
use mundo_data::{AdminUser, DataError};
use tracing::{error, info, warn};

use crate::http::errors::ApiError;
use crate::http::handlers::json_body;
use crate::models::{LoginRequest, LoginResponse, MessageResponse, SessionUser, VerifyResponse};
use crate::state::ApiState;

pub(crate) async fn login(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    if !state.sessions.is_configured() {
        warn!("login refused: no session signing secret configured");
        return Err(ApiError::service_unavailable(
            "sign-in is disabled until a session secret is configured",
        ));
    }
    let request = json_body(payload)?;
    let username = request.username.trim();
    if username.is_empty() || request.password.is_empty() {
        return Err(ApiError::bad_request("username and password are required"));
    }

    let Some(admin) = authenticate(&state, username, &request.password).await? else {
        state.telemetry.inc_login_attempt(false);
        info!(username, "login rejected");
        return Err(ApiError::unauthorized("invalid credentials"));
    };

    let now = Utc::now();
    let admin = state.repo.record_login(&admin.id, now).await?;
    let identity = SessionIdentity {
        user_id: admin.id.clone(),
        username: admin.username.clone(),
        role: admin.role,
    };
    let issued = state.sessions.issue(&identity, now).map_err(|err| {
        error!(error = %err, "failed to sign session credential");
        ApiError::internal("failed to sign session credential")
    })?;
    state.telemetry.inc_login_attempt(true);
    info!(user_id = %admin.id, "login succeeded");

    let cookie = session_cookie(&issued.token, issued.max_age_secs, state.cookie_secure);
    let body = LoginResponse {
        message: "login successful",
        token: issued.token,
        expires_at: issued.expires_at,
        user: SessionUser {
            id: admin.id,
            username: admin.username,
            role: admin.role,
            last_login: admin.last_login,
        },
    };
    Ok(with_cookie(Json(body).into_response(), &cookie))
}

async fn authenticate(
    state: &ApiState,
    username: &str,
    password: &str,
) -> Result<Option<AdminUser>, ApiError> {
    let Some(admin) = state.repo.find_admin_by_username(username).await? else {
        return Ok(None);
    };
    if !admin.is_active {
        return Ok(None);
    }
    match verify_password(&admin.password_hash, password) {
        Ok(true) => Ok(Some(admin)),
        Ok(false) => Ok(None),
        Err(err) => {
            error!(error = %err, user_id = %admin.id, "stored password hash is unusable");
            Ok(None)
        }
    }
}

pub(crate) async fn logout(State(state): State<Arc<ApiState>>) -> Response {
    let body = Json(MessageResponse {
        message: "logged out",
    });
    with_cookie(body.into_response(), &clear_session_cookie(state.cookie_secure))
}

/// Confirm the session still maps to an active account.
pub(crate) async fn verify(
    State(state): State<Arc<ApiState>>,
    Extension(identity): Extension<SessionIdentity>,
) -> Result<Json<VerifyResponse>, ApiError> {
    let admin = active_account(&state, &identity).await?;
    Ok(Json(VerifyResponse {
        user: SessionUser {
            id: admin.id,
            username: admin.username,
            role: admin.role,
            last_login: admin.last_login,
        },
    }))
}

/// Reload the account behind a session; a missing or inactive account purges
/// the cookie.
pub(crate) async fn active_account(
    state: &ApiState,
    identity: &SessionIdentity,
) -> Result<AdminUser, ApiError> {
    let rejected = || {
        ApiError::unauthorized("session user no longer exists")
            .with_cookie(clear_session_cookie(state.cookie_secure))
    };
    match state.repo.get::<AdminUser>(&identity.user_id).await {
        Ok(admin) if admin.is_active => Ok(admin),
        Ok(_) | Err(DataError::NotFound { .. }) => {
            info!(user_id = %identity.user_id, "session account missing or inactive");
            Err(rejected())
        }
        Err(err) => Err(err.into()),
    }
}

fn with_cookie(mut response: Response, cookie: &str) -> Response {
    if let Ok(value) = HeaderValue::from_str(cookie) {
        response.headers_mut().insert(SET_COOKIE, value);
    }
    response
}
