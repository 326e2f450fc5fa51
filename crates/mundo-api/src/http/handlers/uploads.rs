//! Upload folder endpoints: multipart writes and cached reads.

use std::sync::Arc;

use axum::{
    Extension, Json,
    body::Body,
    extract::{Multipart, Path, State, multipart::Field},
    http::{
        StatusCode,
        header::{ACCEPT_RANGES, CACHE_CONTROL, CONTENT_TYPE},
    },
    response::Response,
};
use mundo_auth::SessionIdentity;
use mundo_media::{Bucket, MediaError, StoredFile, UploadPolicy};
use tracing::{error, info, warn};

use crate::http::constants::{UPLOAD_CACHE_CONTROL, UPLOAD_FIELD};
use crate::http::errors::ApiError;
use crate::models::UploadResponse;
use crate::state::ApiState;

pub(crate) async fn serve_upload(
    State(state): State<Arc<ApiState>>,
    Path((bucket, filename)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let bucket: Bucket = bucket.parse()?;
    let file = state.media.open(bucket, &filename).await?;
    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, file.content_type)
        .header(CACHE_CONTROL, UPLOAD_CACHE_CONTROL)
        .header(ACCEPT_RANGES, "bytes")
        .body(Body::from(file.bytes))
        .map_err(|err| {
            error!(error = %err, "failed to build upload response");
            ApiError::internal("failed to build upload response")
        })
}

pub(crate) async fn receive_upload(
    State(state): State<Arc<ApiState>>,
    Extension(identity): Extension<SessionIdentity>,
    Path(bucket): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let bucket: Bucket = bucket.parse()?;
    let policy = state.upload_policy(bucket);
    let mut files: Vec<StoredFile> = Vec::new();

    if let Err(err) = store_fields(&state, bucket, policy, &mut multipart, &mut files).await {
        for stored in &files {
            state.media.remove(bucket, &stored.filename).await;
        }
        if !files.is_empty() {
            info!(bucket = %bucket, count = files.len(), "discarded partial upload");
        }
        return Err(err);
    }

    if files.is_empty() {
        return Err(ApiError::bad_request("no files were provided")
            .with_invalid_param(UPLOAD_FIELD, "required"));
    }
    info!(
        bucket = %bucket,
        count = files.len(),
        user = %identity.username,
        "upload stored"
    );
    Ok(Json(UploadResponse { files }))
}

/// Store every `files` field, pushing each written file as it lands.
async fn store_fields(
    state: &ApiState,
    bucket: Bucket,
    policy: UploadPolicy,
    multipart: &mut Multipart,
    files: &mut Vec<StoredFile>,
) -> Result<(), ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(|err| {
        warn!(error = %err, "malformed multipart body");
        ApiError::bad_request(err.body_text())
    })? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let Some(original_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = read_limited(field, policy).await?;
        let stored = state
            .media
            .store(bucket, &original_name, &bytes, policy)
            .await?;
        files.push(stored);
    }
    Ok(())
}

/// Collect a multipart field, failing as soon as it passes the policy limit.
async fn read_limited(mut field: Field<'_>, policy: UploadPolicy) -> Result<Vec<u8>, ApiError> {
    let mut buffer = Vec::new();
    while let Some(chunk) = field.chunk().await.map_err(|err| {
        warn!(error = %err, "failed to read multipart field");
        ApiError::bad_request(err.body_text())
    })? {
        buffer.extend_from_slice(&chunk);
        let size = u64::try_from(buffer.len()).unwrap_or(u64::MAX);
        if size > policy.max_bytes {
            return Err(MediaError::TooLarge {
                size,
                limit: policy.max_bytes,
            }
            .into());
        }
    }
    Ok(buffer)
}
