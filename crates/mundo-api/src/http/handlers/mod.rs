//! Route handlers grouped by resource.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::http::errors::ApiError;

/// Admin user management.
pub mod admin_users;
/// Promotion banner CRUD.
pub mod banners;
/// Health and metrics endpoints.
pub mod health;
/// Hero media CRUD.
pub mod hero;
/// Map link normalisation.
pub mod maps;
/// Admin HTML shell pages.
pub mod pages;
/// Property CRUD.
pub mod properties;
/// Review CRUD.
pub mod reviews;
/// Robots and sitemap.
pub mod seo;
/// Login, logout, and session verification.
pub mod session;
/// Upload folder endpoints.
pub mod uploads;

/// `?all=true` switch for listings that hide inactive documents by default.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct IncludeInactive {
    pub(crate) all: bool,
}

pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload.map(|Json(body)| body).map_err(ApiError::from)
}

pub(crate) fn json_patch(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Map<String, Value>, ApiError> {
    match json_body(payload)? {
        Value::Object(map) => Ok(map),
        _ => Err(ApiError::bad_request("update body must be a JSON object")),
    }
}

/// Escape text for inclusion in HTML or XML.
pub(crate) fn escape_markup(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_markup;

    #[test]
    fn escape_markup_replaces_markup_characters() {
        assert_eq!(escape_markup("a&b<c>\"d'"), "a&amp;b&lt;c&gt;&quot;d&#39;");
        assert_eq!(escape_markup("plain"), "plain");
    }
}
