//! PostgreSQL connection pool management

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use stream_common::DatabaseConfig;

use crate::repositories::PgDatabase;

/// Maximum time to wait for a connection
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);
/// Maximum idle time before a connection is closed
const IDLE_TIMEOUT: Duration = Duration::from_secs(300);
/// Maximum lifetime of a connection
const MAX_LIFETIME: Duration = Duration::from_secs(1800);

/// Create a new PostgreSQL connection pool
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .idle_timeout(IDLE_TIMEOUT)
        .max_lifetime(MAX_LIFETIME)
        .connect(&config.url)
        .await
}

/// Connect and wrap the pool in the storage gateway
pub async fn connect(config: &DatabaseConfig) -> Result<PgDatabase, sqlx::Error> {
    let pool = create_pool(config).await?;
    info!(
        max_connections = config.max_connections,
        lock_timeout_ms = ?config.lock_timeout_ms,
        "Database pool created"
    );
    Ok(PgDatabase::new(pool).with_lock_timeout(config.lock_timeout()))
}

/// Apply the schema migrations shipped with this crate
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("migrations");
    let migrator = Migrator::new(dir).await?;
    migrator.run(pool).await
}
