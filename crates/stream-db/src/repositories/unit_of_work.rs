//! Transaction-scoped storage gateway
//!
//! [`PgDatabase`] owns the connection pool for the lifetime of the process and
//! hands out [`PgUnitOfWork`]s, each wrapping one open PostgreSQL transaction.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, instrument};

use stream_core::traits::{Database, RepoResult, UnitOfWork};

use super::error::map_db_error;

/// PostgreSQL implementation of the Database gateway
#[derive(Clone)]
pub struct PgDatabase {
    pool: PgPool,
    lock_timeout: Option<Duration>,
}

impl PgDatabase {
    /// Create a new PgDatabase
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            lock_timeout: None,
        }
    }

    /// Bound how long any statement may wait for a row lock
    pub fn with_lock_timeout(mut self, lock_timeout: Option<Duration>) -> Self {
        self.lock_timeout = lock_timeout;
        self
    }

    /// Underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl std::fmt::Debug for PgDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgDatabase")
            .field("pool_size", &self.pool.size())
            .field("lock_timeout", &self.lock_timeout)
            .finish()
    }
}

#[async_trait]
impl Database for PgDatabase {
    #[instrument(skip(self))]
    async fn begin(&self) -> RepoResult<Box<dyn UnitOfWork>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        if let Some(timeout) = self.lock_timeout {
            let statement = format!("SET LOCAL lock_timeout = '{}ms'", timeout.as_millis());
            sqlx::query(&statement)
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
        }

        Ok(Box::new(PgUnitOfWork { tx }))
    }

    #[instrument(skip(self))]
    async fn close(&self) {
        self.pool.close().await;
        debug!("Connection pool closed");
    }
}

/// One open PostgreSQL transaction implementing every repository port.
///
/// Dropping it without committing rolls the transaction back.
pub struct PgUnitOfWork {
    pub(super) tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    #[instrument(skip(self))]
    async fn commit(self: Box<Self>) -> RepoResult<()> {
        self.tx.commit().await.map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn rollback(self: Box<Self>) -> RepoResult<()> {
        self.tx.rollback().await.map_err(map_db_error)
    }
}
