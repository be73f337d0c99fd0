//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};
use tracing::warn;

use crate::api::dto::health::{HealthChecks, HealthResponse, StorageCheck};
use crate::state::AppState;

/// Returns service health status.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: The mapping store answered a ping
/// - **503 Service Unavailable**: The mapping store is unreachable
pub async fn health_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let storage = check_storage(&state).await;
    let (status_code, status) = if storage.is_ok() {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        checks: HealthChecks { storage },
    };

    (status_code, Json(response))
}

async fn check_storage(state: &AppState) -> StorageCheck {
    let store = state.allocator.store();

    if let Err(e) = store.ping().await {
        warn!(error = %e, "health check: mapping store unreachable");
        return StorageCheck::unreachable();
    }

    StorageCheck::ok(store.count().await.ok())
}
