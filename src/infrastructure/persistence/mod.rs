//! SQL implementations of the [`MappingStore`] contract.
//!
//! Both backends keep one table, `url_mappings`, with a unique index on each
//! side of the mapping. The indexes are the collision signal: unique
//! violations are classified by index name (PostgreSQL) or by the offending
//! column in the error message (SQLite).
//!
//! # Stores
//!
//! - [`SqliteMappingStore`] - Default, file-backed store
//! - [`PgMappingStore`] - PostgreSQL store

pub mod pg_mapping_store;
pub mod sqlite_mapping_store;

pub use pg_mapping_store::PgMappingStore;
pub use sqlite_mapping_store::SqliteMappingStore;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::Database;
use sqlx::error::DatabaseError;
use sqlx::pool::PoolOptions;

use crate::config::{Config, StorageBackend};
use crate::domain::entities::UrlMapping;
use crate::domain::errors::{StoreError, UniqueField};
use crate::domain::repositories::MappingStore;

/// Name of the unique index on `long_url`.
pub const LONG_URL_INDEX: &str = "url_mappings_long_url_key";
/// Name of the unique index on `short_code`.
pub const SHORT_CODE_INDEX: &str = "url_mappings_short_code_key";

/// Opens the store selected by `config.database_url` and prepares its schema.
///
/// # Errors
///
/// Returns [`StoreError::Unavailable`] if the connection or schema setup fails.
pub async fn connect(config: &Config) -> Result<Arc<dyn MappingStore>, StoreError> {
    let store: Arc<dyn MappingStore> = match config.storage_backend() {
        StorageBackend::Sqlite => Arc::new(
            SqliteMappingStore::connect(&config.database_url, pool_options(config)).await?,
        ),
        StorageBackend::Postgres => Arc::new(
            PgMappingStore::connect(&config.database_url, pool_options(config)).await?,
        ),
    };

    store.init_schema().await?;
    Ok(store)
}

fn pool_options<DB: Database>(config: &Config) -> PoolOptions<DB> {
    PoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
}

#[derive(sqlx::FromRow)]
pub(crate) struct MappingRow {
    id: i64,
    long_url: String,
    short_code: String,
    created_at: DateTime<Utc>,
}

impl From<MappingRow> for UrlMapping {
    fn from(row: MappingRow) -> Self {
        UrlMapping::new(row.id, row.long_url, row.short_code, row.created_at)
    }
}

/// Translates a driver error into the store taxonomy.
///
/// Only unique violations that can be attributed to one of the two indexes
/// become [`StoreError::UniquenessViolation`]; everything else is
/// [`StoreError::Unavailable`].
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    if let Some(db_err) = err.as_database_error()
        && db_err.is_unique_violation()
    {
        match violated_field(db_err) {
            Some(field) => return StoreError::UniquenessViolation(field),
            None => {
                tracing::error!(error = %db_err, "unique violation on an unknown index");
            }
        }
    }

    StoreError::Unavailable(err.to_string())
}

fn violated_field(db_err: &dyn DatabaseError) -> Option<UniqueField> {
    // SQLite reports no constraint name, only "UNIQUE constraint failed: url_mappings.<column>".
    let hint = db_err.constraint().unwrap_or_else(|| db_err.message());

    if hint.contains("short_code") {
        Some(UniqueField::ShortCode)
    } else if hint.contains("long_url") {
        Some(UniqueField::LongUrl)
    } else {
        None
    }
}
