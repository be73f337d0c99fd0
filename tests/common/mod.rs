#![allow(dead_code)]

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use tempfile::TempDir;
use tinylink::application::services::{Allocator, AllocatorConfig};
use tinylink::domain::repositories::MappingStore;
use tinylink::infrastructure::persistence::SqliteMappingStore;
use tinylink::state::AppState;

pub const BASE_URL: &str = "http://localhost:8000";

/// Opens a private in-memory SQLite database.
///
/// A single connection is kept alive for the whole test, since every new
/// connection to `sqlite::memory:` would see an empty database.
pub async fn memory_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();

    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap()
}

pub async fn memory_store() -> Arc<SqliteMappingStore> {
    store_on(memory_pool().await).await
}

pub async fn store_on(pool: SqlitePool) -> Arc<SqliteMappingStore> {
    let store = SqliteMappingStore::new(Arc::new(pool));
    store.init_schema().await.unwrap();
    Arc::new(store)
}

/// Opens a WAL-mode SQLite file inside `dir` behind a multi-connection pool.
pub async fn file_store(dir: &TempDir, max_connections: u32) -> Arc<SqliteMappingStore> {
    let url = format!("sqlite://{}", dir.path().join("urls.db").display());
    let store = SqliteMappingStore::connect(
        &url,
        SqlitePoolOptions::new().max_connections(max_connections),
    )
    .await
    .unwrap();
    store.init_schema().await.unwrap();
    Arc::new(store)
}

pub fn allocator(store: Arc<SqliteMappingStore>) -> Allocator<SqliteMappingStore> {
    Allocator::new(store, AllocatorConfig::default())
}

pub fn create_test_state(store: Arc<dyn MappingStore>) -> AppState {
    let allocator = Arc::new(Allocator::new(store, AllocatorConfig::default()));
    AppState::new(allocator, BASE_URL)
}

pub async fn create_test_mapping(store: &SqliteMappingStore, url: &str, code: &str) {
    store.insert(url, code).await.unwrap();
}
