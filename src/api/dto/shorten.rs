//! DTOs for the shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::url_normalizer::MAX_URL_LENGTH;

/// `MAX_URL_LENGTH` typed as `u64`, as required by `validator`'s `length` rule.
const MAX_URL_LENGTH_U64: u64 = MAX_URL_LENGTH as u64;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten (must be valid HTTP/HTTPS).
    #[validate(url(message = "Invalid URL format"))]
    #[validate(length(max = MAX_URL_LENGTH_U64, message = "URL is too long"))]
    pub url: String,
}

/// Code and full short link for a shortened URL.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_code: String,
    pub short_url: String,
}
