use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, Query, State, rejection::JsonRejection, rejection::QueryRejection},
    http::StatusCode,
};
use chrono::Utc;
use mundo_auth::SessionIdentity;
use mundo_data::{NewReview, Review, ReviewFilter, new_id};
use serde_json::Value;
use tracing::info;

use crate::http::errors::ApiError;
use crate::http::handlers::{json_body, json_patch};
use crate::models::DeletedResponse;
use crate::state::ApiState;

const DOCUMENT: &str = "reviews";

pub(crate) async fn list_reviews(
    State(state): State<Arc<ApiState>>,
    filter: Result<Query<ReviewFilter>, QueryRejection>,
) -> Result<Json<Vec<Review>>, ApiError> {
    let Query(filter) = filter.map_err(|err| ApiError::bad_request(err.body_text()))?;
    Ok(Json(state.repo.list_reviews(&filter).await?))
}

pub(crate) async fn get_review(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<Review>, ApiError> {
    Ok(Json(state.repo.get(&id).await?))
}

pub(crate) async fn create_review(
    State(state): State<Arc<ApiState>>,
    Extension(identity): Extension<SessionIdentity>,
    payload: Result<Json<NewReview>, JsonRejection>,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    let input = json_body(payload)?;
    let created = state
        .repo
        .create(input.into_document(new_id(), Utc::now()))
        .await?;
    state.telemetry.inc_content_write(DOCUMENT, "create");
    info!(review_id = %created.id, user = %identity.username, "review created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub(crate) async fn update_review(
    State(state): State<Arc<ApiState>>,
    Extension(identity): Extension<SessionIdentity>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Review>, ApiError> {
    let patch = json_patch(payload)?;
    let updated: Review = state.repo.update(&id, &patch, Utc::now()).await?;
    state.telemetry.inc_content_write(DOCUMENT, "update");
    info!(review_id = %id, user = %identity.username, "review updated");
    Ok(Json(updated))
}

pub(crate) async fn delete_review(
    State(state): State<Arc<ApiState>>,
    Extension(identity): Extension<SessionIdentity>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let removed: Review = state.repo.delete(&id).await?;
    state.telemetry.inc_content_write(DOCUMENT, "delete");
    info!(review_id = %removed.id, user = %identity.username, "review deleted");
    Ok(Json(DeletedResponse {
        message: "review deleted",
        id: removed.id,
    }))
}
