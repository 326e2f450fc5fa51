//! RFC 9457 problem responses and the mapping from domain errors.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{HeaderValue, StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Response},
};
use mundo_data::DataError;
use mundo_media::MediaError;
use tracing::{error, warn};

use crate::http::constants::{
    PROBLEM_BAD_REQUEST, PROBLEM_CONFLICT, PROBLEM_FORBIDDEN, PROBLEM_INTERNAL,
    PROBLEM_NOT_FOUND, PROBLEM_PAYLOAD_TOO_LARGE, PROBLEM_SERVICE_UNAVAILABLE,
    PROBLEM_UNAUTHORIZED, PROBLEM_VALIDATION,
};
use crate::models::{ProblemDetails, ProblemInvalidParam};

/// Structured API error with optional RFC 9457 fields.
#[derive(Debug)]
pub struct ApiError {
    pub(crate) status: StatusCode,
    pub(crate) kind: &'static str,
    title: &'static str,
    detail: Option<String>,
    pub(crate) invalid_params: Option<Vec<ProblemInvalidParam>>,
    set_cookie: Option<String>,
}

impl ApiError {
    const fn new(status: StatusCode, kind: &'static str, title: &'static str) -> Self {
        Self {
            status,
            kind,
            title,
            detail: None,
            invalid_params: None,
            set_cookie: None,
        }
    }

    pub(crate) fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub(crate) fn with_invalid_param(
        mut self,
        field: &str,
        message: impl Into<String>,
    ) -> Self {
        self.invalid_params
            .get_or_insert_with(Vec::new)
            .push(ProblemInvalidParam {
                pointer: format!("/{field}"),
                message: message.into(),
            });
        self
    }

    pub(crate) fn with_cookie(mut self, cookie: String) -> Self {
        self.set_cookie = Some(cookie);
        self
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            PROBLEM_INTERNAL,
            "internal server error",
        )
        .with_detail(message)
    }

    pub(crate) fn unauthorized(detail: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            PROBLEM_UNAUTHORIZED,
            "authentication required",
        )
        .with_detail(detail)
    }

    pub(crate) fn forbidden(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, PROBLEM_FORBIDDEN, "forbidden").with_detail(detail)
    }

    pub(crate) fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, PROBLEM_BAD_REQUEST, "bad request").with_detail(detail)
    }

    pub(crate) fn validation(field: &str, reason: &str) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            PROBLEM_VALIDATION,
            "validation failed",
        )
        .with_invalid_param(field, reason)
    }

    pub(crate) fn not_found(detail: impl Into<String>) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            PROBLEM_NOT_FOUND,
            "resource not found",
        )
        .with_detail(detail)
    }

    pub(crate) fn conflict(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, PROBLEM_CONFLICT, "conflict").with_detail(detail)
    }

    pub(crate) fn payload_too_large(detail: impl Into<String>) -> Self {
        Self::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            PROBLEM_PAYLOAD_TOO_LARGE,
            "payload too large",
        )
        .with_detail(detail)
    }

    pub(crate) fn service_unavailable(detail: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            PROBLEM_SERVICE_UNAVAILABLE,
            "service unavailable",
        )
        .with_detail(detail)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ProblemDetails {
            kind: self.kind.to_string(),
            title: self.title.to_string(),
            status: self.status.as_u16(),
            detail: self.detail,
            invalid_params: self.invalid_params,
        };
        let mut response = (self.status, Json(body)).into_response();
        if let Some(cookie) = self.set_cookie
            && let Ok(value) = HeaderValue::from_str(&cookie)
        {
            response.headers_mut().insert(SET_COOKIE, value);
        }
        response
    }
}

impl From<DataError> for ApiError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::NotFound { collection, .. } => {
                Self::not_found(format!("no such document in {collection}"))
            }
            DataError::Conflict { field, .. } => {
                Self::conflict(format!("{field} already exists")).with_invalid_param(field, "taken")
            }
            DataError::Invalid { field, reason } => Self::validation(field, reason),
            DataError::Malformed { source } => {
                Self::bad_request("request body does not match the document shape")
                    .with_invalid_param("body", source.to_string())
            }
            err @ (DataError::MigrationFailed { .. }
            | DataError::QueryFailed { .. }
            | DataError::Serialization { .. }) => {
                error!(error = ?err, "content store failure");
                Self::internal("content store failure")
            }
        }
    }
}

impl From<MediaError> for ApiError {
    fn from(err: MediaError) -> Self {
        match err {
            MediaError::UnknownBucket { value } => Self::not_found(format!("unknown bucket {value}")),
            MediaError::UnsupportedType { extension } => Self::validation(
                "files",
                &format!(
                    "type_not_allowed:{}",
                    extension.as_deref().unwrap_or("none")
                ),
            ),
            MediaError::TooLarge { limit, .. } => {
                Self::payload_too_large(format!("file exceeds the {limit} byte limit"))
            }
            MediaError::InvalidName { .. } | MediaError::NotFound { .. } => {
                Self::not_found("file not found")
            }
            err @ MediaError::Io { .. } => {
                error!(error = ?err, "media folder failure");
                Self::internal("media folder failure")
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection, "rejected request body");
        Self::bad_request(rejection.body_text())
    }
}
