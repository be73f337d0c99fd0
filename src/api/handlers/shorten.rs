//! Handler for link shortening endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::short_url::build_short_url;
use crate::utils::url_normalizer::normalize_url;

/// Returns the short code for a URL, allocating one on first submission.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/page" }
/// ```
///
/// # Response
///
/// ```json
/// { "short_code": "aB3xY9", "short_url": "http://localhost:8000/aB3xY9" }
/// ```
///
/// Submitting the same URL again returns the same code.
///
/// # Errors
///
/// - 400 Bad Request if the URL is malformed or not http(s)
/// - 500 Internal Server Error if no free code was found within the attempt bound
/// - 503 Service Unavailable if the mapping store cannot be reached
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let long_url = normalize_url(&payload.url)?;
    let short_code = state.allocator.resolve_or_create(&long_url).await?;
    let short_url = build_short_url(&state.base_url, &short_code);

    Ok(Json(ShortenResponse {
        short_code,
        short_url,
    }))
}
