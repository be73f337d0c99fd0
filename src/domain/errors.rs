//! Error taxonomy shared by the mapping store and the allocator.

use std::fmt;

use thiserror::Error;

/// Which unique index rejected an insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    LongUrl,
    ShortCode,
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniqueField::LongUrl => f.write_str("long_url"),
            UniqueField::ShortCode => f.write_str("short_code"),
        }
    }
}

/// Failures reported by a [`MappingStore`](crate::domain::repositories::MappingStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The physical write hit a unique constraint.
    #[error("unique constraint violated on {0}")]
    UniquenessViolation(UniqueField),

    /// The backend could not be reached or failed to run the statement.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Outcomes of allocator operations that are surfaced to callers.
///
/// [`StoreError::UniquenessViolation`] never appears here: the allocator
/// resolves it internally by retrying or by re-reading the winning mapping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    #[error("failed to allocate a unique short code after {attempts} attempts")]
    Exhausted { attempts: u32 },

    #[error("short code not found: {code}")]
    NotFound { code: String },

    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl From<StoreError> for AllocationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(message) => AllocationError::StorageUnavailable(message),
            StoreError::UniquenessViolation(field) => AllocationError::StorageUnavailable(
                format!("unexpected uniqueness violation on {field}"),
            ),
        }
    }
}
