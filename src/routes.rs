//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorten`       - Create or resolve a short code
//! - `GET  /health`        - Storage health check
//! - `GET  /{short_code}`  - Short link redirect
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Origins from `ALLOW_ORIGINS`
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `allow_origins` - CORS origins; `*` allows any origin
pub fn app_router(state: AppState, allow_origins: &[String]) -> NormalizePath<Router> {
    let router = api::routes::routes()
        .with_state(state)
        .layer(cors::layer(allow_origins))
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
