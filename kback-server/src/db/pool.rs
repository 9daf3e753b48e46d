//! Database connection pool management
//!
//! Uses sqlx `AnyPool` so the same session code runs against Postgres in
//! production and SQLite in tests.

use sqlx::any::{install_default_drivers, AnyPoolOptions};
use sqlx::AnyPool;

use super::DbError;
use crate::config::DatabaseConfig;

fn pool_options(config: &DatabaseConfig) -> AnyPoolOptions {
    AnyPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
}

/// Create a connection pool and verify the backing store is reachable.
///
/// # Errors
///
/// Returns [`DbError::Connection`] if no connection can be established
/// within the configured acquire timeout.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&DatabaseConfig::new("postgres://localhost/k_back")).await?;
/// ```
pub async fn create_pool(config: &DatabaseConfig) -> Result<AnyPool, DbError> {
    install_default_drivers();
    pool_options(config)
        .connect(&config.url)
        .await
        .map_err(DbError::Connection)
}
