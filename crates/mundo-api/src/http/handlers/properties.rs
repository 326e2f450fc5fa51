//! Property listings. Map links are normalised on write; reads add the embed
//! link and a messaging inquiry link.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, Query, State, rejection::JsonRejection, rejection::QueryRejection},
    http::StatusCode,
};
use chrono::Utc;
use mundo_auth::SessionIdentity;
use mundo_data::{NewProperty, Property, PropertyFilter, new_id};
use mundo_maps::normalize_map_link;
use serde_json::Value;
use tracing::info;

use crate::http::constants::{INQUIRY_BASE, INQUIRY_GREETING};
use crate::http::errors::ApiError;
use crate::http::handlers::{json_body, json_patch};
use crate::models::{DeletedResponse, PropertyDetail};
use crate::state::ApiState;

const DOCUMENT: &str = "properties";
const MAP_FIELD: &str = "google_map_url";

pub(crate) async fn list_properties(
    State(state): State<Arc<ApiState>>,
    filter: Result<Query<PropertyFilter>, QueryRejection>,
) -> Result<Json<Vec<PropertyDetail>>, ApiError> {
    let Query(filter) = filter.map_err(|err| ApiError::bad_request(err.body_text()))?;
    let properties = state.repo.list_properties(&filter).await?;
    Ok(Json(
        properties
            .into_iter()
            .map(|property| detail(&state, property))
            .collect(),
    ))
}

pub(crate) async fn get_property(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<PropertyDetail>, ApiError> {
    let property: Property = state.repo.get(&id).await?;
    Ok(Json(detail(&state, property)))
}

pub(crate) async fn create_property(
    State(state): State<Arc<ApiState>>,
    Extension(identity): Extension<SessionIdentity>,
    payload: Result<Json<NewProperty>, JsonRejection>,
) -> Result<(StatusCode, Json<PropertyDetail>), ApiError> {
    let mut input = json_body(payload)?;
    input.google_map_url = input.google_map_url.as_deref().and_then(stored_map_link);
    let created = state
        .repo
        .create(input.into_document(new_id(), Utc::now()))
        .await?;
    state.telemetry.inc_content_write(DOCUMENT, "create");
    info!(property_id = %created.id, user = %identity.username, "property created");
    Ok((StatusCode::CREATED, Json(detail(&state, created))))
}

pub(crate) async fn update_property(
    State(state): State<Arc<ApiState>>,
    Extension(identity): Extension<SessionIdentity>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PropertyDetail>, ApiError> {
    let mut patch = json_patch(payload)?;
    let normalized = match patch.get(MAP_FIELD) {
        Some(Value::String(raw)) => Some(stored_map_link(raw).map_or(Value::Null, Value::String)),
        _ => None,
    };
    if let Some(value) = normalized {
        patch.insert(MAP_FIELD.to_string(), value);
    }
    let updated: Property = state.repo.update(&id, &patch, Utc::now()).await?;
    state.telemetry.inc_content_write(DOCUMENT, "update");
    info!(property_id = %id, user = %identity.username, "property updated");
    Ok(Json(detail(&state, updated)))
}

pub(crate) async fn delete_property(
    State(state): State<Arc<ApiState>>,
    Extension(identity): Extension<SessionIdentity>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let removed: Property = state.repo.delete(&id).await?;
    state.telemetry.inc_content_write(DOCUMENT, "delete");
    info!(property_id = %removed.id, user = %identity.username, "property deleted");
    Ok(Json(DeletedResponse {
        message: "property deleted",
        id: removed.id,
    }))
}

/// Value persisted for a submitted map link: the embed form when one exists,
/// otherwise the trimmed input. Blank input clears the link.
fn stored_map_link(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(normalize_map_link(trimmed).unwrap_or_else(|| trimmed.to_string()))
}

fn detail(state: &ApiState, property: Property) -> PropertyDetail {
    let embed_map_url = property
        .google_map_url
        .as_deref()
        .and_then(normalize_map_link);
    let inquiry_url = inquiry_url(&state.site.contact_phone, &property.title);
    PropertyDetail {
        property,
        embed_map_url,
        inquiry_url,
    }
}

pub(crate) fn inquiry_url(phone: &str, title: &str) -> String {
    let message = format!("{INQUIRY_GREETING}{title}");
    format!(
        "{INQUIRY_BASE}{phone}?text={}",
        urlencoding::encode(&message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inquiry_url_encodes_the_title() {
        assert_eq!(
            inquiry_url("573164032039", "Casa & Mar"),
            "https://wa.me/573164032039?text=Hola%2C%20me%20interesa%20reservar%20la%20propiedad%3A%20Casa%20%26%20Mar"
        );
    }

    #[test]
    fn stored_map_link_prefers_embed_form() {
        assert_eq!(
            stored_map_link(" https://www.google.com/maps/@10.391,-75.479,15z "),
            Some(
                "https://maps.google.com/maps?q=10.391,-75.479&t=&z=15&ie=UTF8&iwloc=&output=embed"
                    .to_string()
            )
        );
        assert_eq!(
            stored_map_link("https://goo.gl/maps/abc123"),
            Some("https://goo.gl/maps/abc123".to_string())
        );
        assert_eq!(stored_map_link("   "), None);
    }
}
