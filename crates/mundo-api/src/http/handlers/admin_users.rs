//! Admin account management. Creating and deleting accounts requires the
//! `super_admin` role.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::Utc;
use mundo_auth::{SessionIdentity, hash_password};
use mundo_data::{AdminUser, NewAdminUser};
use tracing::{error, info};

use crate::http::errors::ApiError;
use crate::http::handlers::json_body;
use crate::http::handlers::session::active_account;
use crate::models::{AdminUserCreated, AdminUserList, DeletedResponse};
use crate::state::ApiState;

const DOCUMENT: &str = "admin_users";

pub(crate) async fn list_admin_users(
    State(state): State<Arc<ApiState>>,
    Extension(identity): Extension<SessionIdentity>,
) -> Result<Json<AdminUserList>, ApiError> {
    active_account(&state, &identity).await?;
    let users = state
        .repo
        .list_admins()
        .await?
        .iter()
        .map(AdminUser::view)
        .collect();
    Ok(Json(AdminUserList { users }))
}

pub(crate) async fn create_admin_user(
    State(state): State<Arc<ApiState>>,
    Extension(identity): Extension<SessionIdentity>,
    payload: Result<Json<NewAdminUser>, JsonRejection>,
) -> Result<(StatusCode, Json<AdminUserCreated>), ApiError> {
    require_super_admin(&state, &identity).await?;
    let input = json_body(payload)?;
    input.validate()?;
    let password_hash = hash_password(&input.password).map_err(|err| {
        error!(error = %err, "failed to hash password");
        ApiError::internal("failed to hash password")
    })?;
    let created = state
        .repo
        .create_admin(input, password_hash, Utc::now())
        .await?;
    state.telemetry.inc_content_write(DOCUMENT, "create");
    info!(
        user_id = %created.id,
        role = %created.role,
        created_by = %identity.username,
        "admin user created"
    );
    Ok((
        StatusCode::CREATED,
        Json(AdminUserCreated {
            message: "user created",
            user: created.view(),
        }),
    ))
}

pub(crate) async fn delete_admin_user(
    State(state): State<Arc<ApiState>>,
    Extension(identity): Extension<SessionIdentity>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    require_super_admin(&state, &identity).await?;
    if id == identity.user_id {
        return Err(ApiError::bad_request("you cannot delete your own account"));
    }
    let removed: AdminUser = state.repo.delete(&id).await?;
    state.telemetry.inc_content_write(DOCUMENT, "delete");
    info!(user_id = %removed.id, deleted_by = %identity.username, "admin user deleted");
    Ok(Json(DeletedResponse {
        message: "user deleted",
        id: removed.id,
    }))
}

/// Checks the stored account rather than the role baked into the credential.
async fn require_super_admin(
    state: &ApiState,
    identity: &SessionIdentity,
) -> Result<(), ApiError> {
    let account = active_account(state, identity).await?;
    if account.role.manages_users() {
        Ok(())
    } else {
        Err(ApiError::forbidden("only super administrators manage users"))
    }
}
