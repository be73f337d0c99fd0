//! API route configuration.

use crate::api::handlers::{health_handler, redirect_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All public routes.
///
/// # Endpoints
///
/// - `POST /shorten`       - Resolve or create the short code for a URL
/// - `GET  /health`        - Storage health check
/// - `GET  /{short_code}`  - Redirect to the original URL
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/health", get(health_handler))
        .route("/{short_code}", get(redirect_handler))
}
