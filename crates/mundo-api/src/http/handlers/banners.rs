use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::Utc;
use mundo_auth::SessionIdentity;
use mundo_data::{NewPromotionBanner, PromotionBanner, new_id};
use serde_json::Value;
use tracing::info;

use crate::http::errors::ApiError;
use crate::http::handlers::{IncludeInactive, json_body, json_patch};
use crate::models::{BannerList, DeletedResponse};
use crate::state::ApiState;

const DOCUMENT: &str = "promotion_banners";

pub(crate) async fn list_banners(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<IncludeInactive>,
) -> Result<Json<BannerList>, ApiError> {
    let banners = state.repo.list_banners(query.all).await?;
    Ok(Json(BannerList { banners }))
}

pub(crate) async fn get_banner(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<PromotionBanner>, ApiError> {
    Ok(Json(state.repo.get(&id).await?))
}

pub(crate) async fn create_banner(
    State(state): State<Arc<ApiState>>,
    Extension(identity): Extension<SessionIdentity>,
    payload: Result<Json<NewPromotionBanner>, JsonRejection>,
) -> Result<(StatusCode, Json<PromotionBanner>), ApiError> {
    let input = json_body(payload)?;
    let created = state
        .repo
        .create(input.into_document(new_id(), Utc::now()))
        .await?;
    state.telemetry.inc_content_write(DOCUMENT, "create");
    info!(banner_id = %created.id, user = %identity.username, "banner created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub(crate) async fn update_banner(
    State(state): State<Arc<ApiState>>,
    Extension(identity): Extension<SessionIdentity>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PromotionBanner>, ApiError> {
    let patch = json_patch(payload)?;
    let updated: PromotionBanner = state.repo.update(&id, &patch, Utc::now()).await?;
    state.telemetry.inc_content_write(DOCUMENT, "update");
    info!(banner_id = %id, user = %identity.username, "banner updated");
    Ok(Json(updated))
}

pub(crate) async fn delete_banner(
    State(state): State<Arc<ApiState>>,
    Extension(identity): Extension<SessionIdentity>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let removed: PromotionBanner = state.repo.delete(&id).await?;
    state.telemetry.inc_content_write(DOCUMENT, "delete");
    info!(banner_id = %removed.id, user = %identity.username, "banner deleted");
    Ok(Json(DeletedResponse {
        message: "banner deleted",
        id: removed.id,
    }))
}
