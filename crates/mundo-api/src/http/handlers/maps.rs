use axum::{Json, extract::rejection::JsonRejection};
use mundo_maps::{is_embed_link, normalize_map_link};

use crate::http::errors::ApiError;
use crate::http::handlers::json_body;
use crate::models::{MapNormalizeRequest, MapNormalizeResponse};

/// Convert a pasted map link into its embed form, echoing the input as the
/// plain-link fallback and flagging input that was already embeddable.
pub(crate) async fn normalize(
    payload: Result<Json<MapNormalizeRequest>, JsonRejection>,
) -> Result<Json<MapNormalizeResponse>, ApiError> {
    let request = json_body(payload)?;
    Ok(Json(MapNormalizeResponse {
        embed_url: normalize_map_link(&request.url),
        fallback_url: request.url.trim().to_string(),
        already_embedded: is_embed_link(&request.url),
    }))
}
