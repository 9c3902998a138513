//! API router.
//!
//! Routes are nested under `/api/`. Every response passes through the
//! access logger and carries `Cache-Control: no-store`; uploads are capped
//! at `config::MAX_UPLOAD_BYTES`.

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue};
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::config;

/// Build the API router.
pub fn api_router(ctx: ApiContext) -> Router {
    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/analyze", post(endpoints::analyze::analyze))
        .route("/analyze/upload", post(endpoints::analyze::upload))
        .with_state(ctx);

    // ServiceBuilder applies top to bottom: logger outermost
    Router::new().nest("/api", api).layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn(middleware::audit::log_access))
            .layer(SetResponseHeaderLayer::overriding(
                header::CACHE_CONTROL,
                HeaderValue::from_static("no-store"),
            ))
            .layer(DefaultBodyLimit::max(config::MAX_UPLOAD_BYTES)),
    )
}
