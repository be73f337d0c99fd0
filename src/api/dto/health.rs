//! DTOs for health check endpoint.

use serde::Serialize;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`
    pub status: &'static str,
    pub version: &'static str,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub storage: StorageCheck,
}

/// Result of pinging the mapping store.
#[derive(Debug, Serialize)]
pub struct StorageCheck {
    /// `ok` or `error`
    pub status: &'static str,

    /// Number of stored mappings, when the count query succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mappings: Option<u64>,
}

impl StorageCheck {
    pub fn ok(mappings: Option<u64>) -> Self {
        Self {
            status: "ok",
            mappings,
        }
    }

    pub fn unreachable() -> Self {
        Self {
            status: "error",
            mappings: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
