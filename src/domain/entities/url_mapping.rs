//! Url mapping entity: the durable pair of a long URL and its short code.

use chrono::{DateTime, Utc};

/// A stored mapping between a normalized long URL and its short code.
///
/// Mappings are immutable once created. Both `long_url` and `short_code` are
/// unique across the store, so the stored set forms a bijection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMapping {
    pub id: i64,
    pub long_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
}

impl UrlMapping {
    /// Creates a new UrlMapping instance.
    pub fn new(id: i64, long_url: String, short_code: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            long_url,
            short_code,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_creation() {
        let now = Utc::now();
        let mapping = UrlMapping::new(
            1,
            "https://example.com/page".to_string(),
            "aB3xY9".to_string(),
            now,
        );

        assert_eq!(mapping.id, 1);
        assert_eq!(mapping.long_url, "https://example.com/page");
        assert_eq!(mapping.short_code, "aB3xY9");
        assert_eq!(mapping.created_at, now);
    }
}
