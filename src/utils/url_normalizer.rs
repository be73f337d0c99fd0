//! URL normalization applied before a URL reaches the allocator.
//!
//! The allocator deduplicates by exact string, so every spelling of the same
//! address has to collapse into one canonical form first.

use url::Url;

/// Longest URL accepted for shortening, in bytes.
pub const MAX_URL_LENGTH: usize = 2048;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlNormalizationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS URLs can be shortened")]
    UnsupportedScheme,

    #[error("URL must include a host")]
    MissingHost,

    #[error("URL exceeds {MAX_URL_LENGTH} characters")]
    TooLong,
}

/// Normalizes a URL to its canonical form.
///
/// - Surrounding whitespace is trimmed
/// - Only `http` and `https` are accepted
/// - Scheme and host are lower-cased
/// - Default ports (80 / 443) and fragments are dropped
/// - An empty path becomes `/`; path and query keep their case
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let trimmed = input.trim();
    if trimmed.len() > MAX_URL_LENGTH {
        return Err(UrlNormalizationError::TooLong);
    }

    let mut url =
        Url::parse(trimmed).map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(UrlNormalizationError::UnsupportedScheme);
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(UrlNormalizationError::MissingHost),
    }

    // The parser already lower-cases domains and strips default ports for
    // special schemes; the fragment is the only part left to drop.
    url.set_fragment(None);

    let normalized = String::from(url);
    if normalized.len() > MAX_URL_LENGTH {
        return Err(UrlNormalizationError::TooLong);
    }

    Ok(normalized)
}
