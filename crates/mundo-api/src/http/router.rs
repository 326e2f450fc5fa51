//! Router construction and server host for the API.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{
        HeaderName, Method, Request,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    middleware,
    routing::{delete, get, post, put},
};
use mundo_telemetry::{build_sha, propagate_request_id_layer, set_request_id_layer};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{Span, info};

use crate::error::{ApiServerError, ApiServerResult};
use crate::http::auth::{require_page_session, require_session};
use crate::http::constants::{HEADER_REQUEST_ID, MAX_FILES_PER_UPLOAD};
use crate::http::handlers::{
    admin_users::{create_admin_user, delete_admin_user, list_admin_users},
    banners::{create_banner, delete_banner, get_banner, list_banners, update_banner},
    health::{health, metrics},
    hero::{create_hero_media, delete_hero_media, list_hero_media},
    maps::normalize,
    pages::{admin_page, login_page},
    properties::{
        create_property, delete_property, get_property, list_properties, update_property,
    },
    reviews::{create_review, delete_review, get_review, list_reviews, update_review},
    seo::{robots, sitemap},
    session::{login, logout, verify},
    uploads::{receive_upload, serve_upload},
};
use crate::http::telemetry::HttpMetricsLayer;
use crate::state::ApiState;

/// Axum router wrapper that hosts the Mundo API.
pub struct ApiServer {
    router: Router,
}

impl ApiServer {
    /// Build the router over shared application state.
    #[must_use]
    pub fn new(state: ApiState) -> Self {
        let state = Arc::new(state);
        let telemetry = state.telemetry.clone();
        let cors_layer = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([
                CONTENT_TYPE,
                AUTHORIZATION,
                HeaderName::from_static(HEADER_REQUEST_ID),
            ]);
        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &Request<_>| {
                let request_id = request
                    .headers()
                    .get(HEADER_REQUEST_ID)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("")
                    .to_string();
                tracing::info_span!(
                    "http.request",
                    method = %request.method(),
                    route = %request.uri().path(),
                    request_id = %request_id,
                    build_sha = %build_sha(),
                    status_code = tracing::field::Empty,
                    latency_ms = tracing::field::Empty
                )
            })
            .on_request(|_request: &Request<_>, _span: &Span| {})
            .on_response(
                |response: &axum::response::Response, latency: Duration, span: &Span| {
                    span.record("status_code", response.status().as_u16());
                    let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
                    span.record("latency_ms", latency_ms);
                },
            );
        let layered = ServiceBuilder::new()
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer())
            .layer(trace_layer)
            .layer(HttpMetricsLayer::new(telemetry));

        let router = Self::public_routes(&state)
            .merge(Self::guarded_api_routes(&state))
            .merge(Self::admin_pages(&state))
            .layer(cors_layer)
            .route_layer(layered)
            .with_state(state);

        Self { router }
    }

    fn public_routes(state: &Arc<ApiState>) -> Router<Arc<ApiState>> {
        let require_api = middleware::from_fn_with_state(state.clone(), require_session);
        let upload_limit = state
            .uploads
            .max_image_bytes
            .max(state.uploads.max_hero_bytes)
            .saturating_mul(MAX_FILES_PER_UPLOAD);
        let upload_limit = usize::try_from(upload_limit).unwrap_or(usize::MAX);

        Router::new()
            .route("/health", get(health))
            .route("/metrics", get(metrics))
            .route("/robots.txt", get(robots))
            .route("/sitemap.xml", get(sitemap))
            .route(
                "/api/properties",
                get(list_properties).merge(post(create_property).route_layer(require_api.clone())),
            )
            .route(
                "/api/properties/{id}",
                get(get_property).merge(
                    put(update_property)
                        .delete(delete_property)
                        .route_layer(require_api.clone()),
                ),
            )
            .route(
                "/api/reviews",
                get(list_reviews).merge(post(create_review).route_layer(require_api.clone())),
            )
            .route(
                "/api/reviews/{id}",
                get(get_review).merge(
                    put(update_review)
                        .delete(delete_review)
                        .route_layer(require_api.clone()),
                ),
            )
            .route(
                "/api/promotion-banners",
                get(list_banners).merge(post(create_banner).route_layer(require_api.clone())),
            )
            .route(
                "/api/promotion-banners/{id}",
                get(get_banner).merge(
                    put(update_banner)
                        .delete(delete_banner)
                        .route_layer(require_api.clone()),
                ),
            )
            .route(
                "/api/hero-images",
                get(list_hero_media)
                    .merge(post(create_hero_media).route_layer(require_api.clone())),
            )
            .route(
                "/api/hero-images/{id}",
                delete(delete_hero_media).route_layer(require_api.clone()),
            )
            .route("/api/uploads/{bucket}/{filename}", get(serve_upload))
            .route(
                "/api/uploads/{bucket}",
                post(receive_upload)
                    .layer(DefaultBodyLimit::max(upload_limit))
                    .route_layer(require_api),
            )
            .route("/api/maps/normalize", post(normalize))
            .route("/api/auth/login", post(login))
            .route("/api/auth/logout", post(logout))
            .route("/admin/login", get(login_page))
    }

    fn guarded_api_routes(state: &Arc<ApiState>) -> Router<Arc<ApiState>> {
        let require_api = middleware::from_fn_with_state(state.clone(), require_session);

        Router::new()
            .route("/api/auth/verify", get(verify))
            .route(
                "/api/admin/users",
                get(list_admin_users).post(create_admin_user),
            )
            .route("/api/admin/users/{id}", delete(delete_admin_user))
            .route_layer(require_api)
    }

    fn admin_pages(state: &Arc<ApiState>) -> Router<Arc<ApiState>> {
        let require_page = middleware::from_fn_with_state(state.clone(), require_page_session);

        Router::new()
            .route("/admin", get(admin_page))
            .route("/admin/dashboard", get(admin_page))
            .route("/admin/properties", get(admin_page))
            .route("/admin/reviews", get(admin_page))
            .route("/admin/", get(admin_page))
            .route("/admin/{*rest}", get(admin_page))
            .route_layer(require_page)
    }

    /// Serve the API on `addr` until the listener fails.
    ///
    /// # Errors
    ///
    /// Returns [`ApiServerError::Bind`] when the listener cannot bind, or
    /// [`ApiServerError::Serve`] when the server terminates unexpectedly.
    pub async fn serve(self, addr: SocketAddr) -> ApiServerResult<()> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ApiServerError::Bind { addr, source })?;
        info!(%addr, "serving api");
        axum::serve(listener, self.router.into_make_service())
            .await
            .map_err(|source| ApiServerError::Serve { source })
    }

    /// Router with all layers applied, for embedding or driving in tests.
    #[must_use]
    pub fn into_router(self) -> Router {
        self.router
    }
}
