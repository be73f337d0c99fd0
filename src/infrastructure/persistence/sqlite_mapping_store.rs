//! SQLite implementation of the mapping store.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::pool::PoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode};
use std::str::FromStr;
use std::sync::Arc;

use super::{LONG_URL_INDEX, MappingRow, SHORT_CODE_INDEX, map_sqlx_error};
use crate::domain::entities::UrlMapping;
use crate::domain::errors::StoreError;
use crate::domain::repositories::MappingStore;

/// SQLite-backed mapping store.
///
/// Writes are serialized by SQLite itself, and both unique indexes are
/// checked inside the `INSERT`, so concurrent allocations never need an
/// application-level lock.
pub struct SqliteMappingStore {
    pool: Arc<SqlitePool>,
}

impl SqliteMappingStore {
    /// Creates a store over an existing connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Opens (and creates if missing) the database file at `database_url`.
    pub async fn connect(
        database_url: &str,
        pool_options: PoolOptions<sqlx::Sqlite>,
    ) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(map_sqlx_error)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;

        Ok(Self::new(Arc::new(pool)))
    }
}

#[async_trait]
impl MappingStore for SqliteMappingStore {
    async fn init_schema(&self) -> Result<(), StoreError> {
        let statements = [
            r#"
            CREATE TABLE IF NOT EXISTS url_mappings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                long_url TEXT NOT NULL,
                short_code TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#
            .to_string(),
            format!(
                "CREATE UNIQUE INDEX IF NOT EXISTS {LONG_URL_INDEX} ON url_mappings (long_url)"
            ),
            format!(
                "CREATE UNIQUE INDEX IF NOT EXISTS {SHORT_CODE_INDEX} ON url_mappings (short_code)"
            ),
        ];

        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        for statement in &statements {
            sqlx::query(statement)
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx_error)?;
        }
        tx.commit().await.map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn find_by_url(&self, long_url: &str) -> Result<Option<UrlMapping>, StoreError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            SELECT id, long_url, short_code, created_at
            FROM url_mappings
            WHERE long_url = ?
            "#,
        )
        .bind(long_url)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(UrlMapping::from))
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<UrlMapping>, StoreError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            SELECT id, long_url, short_code, created_at
            FROM url_mappings
            WHERE short_code = ?
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(UrlMapping::from))
    }

    async fn insert(&self, long_url: &str, short_code: &str) -> Result<UrlMapping, StoreError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            INSERT INTO url_mappings (long_url, short_code, created_at)
            VALUES (?, ?, ?)
            RETURNING id, long_url, short_code, created_at
            "#,
        )
        .bind(long_url)
        .bind(short_code)
        .bind(Utc::now())
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url_mappings")
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }
}
