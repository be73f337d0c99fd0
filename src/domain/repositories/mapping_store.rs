//! Mapping store contract: durable, bidirectionally indexed url mappings.

use crate::domain::entities::UrlMapping;
use crate::domain::errors::StoreError;
use async_trait::async_trait;

/// Persistence for [`UrlMapping`] records.
///
/// Both `long_url` and `short_code` must be unique, and the uniqueness must be
/// enforced by the storage layer itself at write time. A prior read is never
/// enough to rule out a conflict when several callers race on the same key.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteMappingStore`]
/// - [`crate::infrastructure::persistence::PgMappingStore`]
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingStore: Send + Sync {
    /// Creates the table and both unique indexes if they are missing.
    ///
    /// Idempotent; called on every process start.
    async fn init_schema(&self) -> Result<(), StoreError>;

    /// Looks up a mapping through the unique index on `long_url`.
    async fn find_by_url(&self, long_url: &str) -> Result<Option<UrlMapping>, StoreError>;

    /// Looks up a mapping through the unique index on `short_code`.
    async fn find_by_code(&self, short_code: &str) -> Result<Option<UrlMapping>, StoreError>;

    /// Inserts a new mapping stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UniquenessViolation`] naming the violated index
    /// when either value already exists at the moment of the write.
    /// Returns [`StoreError::Unavailable`] on any other backend failure.
    async fn insert(&self, long_url: &str, short_code: &str) -> Result<UrlMapping, StoreError>;

    /// Returns the number of stored mappings.
    async fn count(&self) -> Result<u64, StoreError>;

    /// Performs a trivial round trip to the backend.
    async fn ping(&self) -> Result<(), StoreError>;
}
