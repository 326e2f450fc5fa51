use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::Utc;
use mundo_auth::SessionIdentity;
use mundo_data::{HeroMedia, NewHeroMedia, new_id};
use mundo_media::parse_local_url;
use tracing::info;

use crate::http::errors::ApiError;
use crate::http::handlers::{IncludeInactive, json_body};
use crate::models::{DeletedResponse, HeroList};
use crate::state::ApiState;

const DOCUMENT: &str = "hero_media";

pub(crate) async fn list_hero_media(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<IncludeInactive>,
) -> Result<Json<HeroList>, ApiError> {
    let images = state.repo.list_hero_media(query.all).await?;
    Ok(Json(HeroList { images }))
}

pub(crate) async fn create_hero_media(
    State(state): State<Arc<ApiState>>,
    Extension(identity): Extension<SessionIdentity>,
    payload: Result<Json<NewHeroMedia>, JsonRejection>,
) -> Result<(StatusCode, Json<HeroMedia>), ApiError> {
    let input = json_body(payload)?;
    let created = state
        .repo
        .create(input.into_document(new_id(), Utc::now()))
        .await?;
    state.telemetry.inc_content_write(DOCUMENT, "create");
    info!(hero_id = %created.id, user = %identity.username, "hero media created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub(crate) async fn delete_hero_media(
    State(state): State<Arc<ApiState>>,
    Extension(identity): Extension<SessionIdentity>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let removed: HeroMedia = state.repo.delete(&id).await?;
    state.telemetry.inc_content_write(DOCUMENT, "delete");
    if let Some((bucket, filename)) = parse_local_url(&removed.url) {
        let deleted_file = state.media.remove(bucket, &filename).await;
        info!(hero_id = %removed.id, filename, deleted_file, "hero media file cleanup");
    }
    info!(hero_id = %removed.id, user = %identity.username, "hero media deleted");
    Ok(Json(DeletedResponse {
        message: "hero media deleted",
        id: removed.id,
    }))
}
