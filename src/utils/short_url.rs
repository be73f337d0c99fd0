/// Formats the human-facing short link for a code.
///
/// Pure concatenation; a trailing slash on `base_url` is ignored.
pub fn build_short_url(base_url: &str, short_code: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), short_code)
}
