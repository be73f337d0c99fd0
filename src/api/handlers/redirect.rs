//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use serde_json::json;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::code_generator::is_well_formed;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{short_code}`
///
/// Returns 307 Temporary Redirect with the stored URL in `Location`.
///
/// # Errors
///
/// Returns 404 Not Found if the code was never issued. Paths that cannot be
/// a code at all are rejected without touching the store.
pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    if !is_well_formed(&short_code) {
        return Err(AppError::not_found(
            "Short code not found",
            json!({ "short_code": short_code }),
        ));
    }

    let long_url = state.allocator.lookup(&short_code).await?;
    debug!(%short_code, "redirecting");

    Ok(Redirect::temporary(&long_url))
}
