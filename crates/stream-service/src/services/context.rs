//! Service context - dependency container for services
//!
//! Holds the storage gateway handle, the frozen scheduling horizon and the
//! per-operation deadline. Created once at process start and shut down
//! explicitly.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use stream_common::AppConfig;
use stream_core::traits::{Database, UnitOfWork};
use stream_core::{DomainError, SchedulingHorizon};
use tracing::{info, warn};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    db: Arc<dyn Database>,
    horizon: SchedulingHorizon,
    transaction_timeout: Duration,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        db: Arc<dyn Database>,
        horizon: SchedulingHorizon,
        transaction_timeout: Duration,
    ) -> Self {
        Self {
            db,
            horizon,
            transaction_timeout,
        }
    }

    /// Connect to PostgreSQL and build the context from configuration
    ///
    /// # Errors
    /// Returns an error if the horizon is invalid or the database is unreachable
    pub async fn from_config(config: &AppConfig) -> ServiceResult<Self> {
        let horizon = config
            .schedule
            .horizon()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let db = stream_db::connect(&config.database)
            .await
            .map_err(stream_db::map_db_error)?;

        info!(
            horizon_start = horizon.start_at(),
            horizon_end = horizon.end_at(),
            "Service context ready"
        );

        Ok(Self::new(
            Arc::new(db),
            horizon,
            config.schedule.transaction_timeout(),
        ))
    }

    /// Get the storage gateway
    pub fn db(&self) -> &dyn Database {
        self.db.as_ref()
    }

    /// Get the scheduling horizon
    pub fn horizon(&self) -> &SchedulingHorizon {
        &self.horizon
    }

    /// Get the per-operation deadline
    pub fn transaction_timeout(&self) -> Duration {
        self.transaction_timeout
    }

    /// Open a new unit of work
    pub async fn begin(&self) -> ServiceResult<Box<dyn UnitOfWork>> {
        Ok(self.db.begin().await?)
    }

    /// Commit on success, roll back on failure, and hand the result through
    pub async fn finish<T>(
        &self,
        tx: Box<dyn UnitOfWork>,
        result: ServiceResult<T>,
    ) -> ServiceResult<T> {
        match result {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if err.as_domain().is_some_and(DomainError::is_storage) {
                    warn!(error = %err, "Storage failure, rolling back");
                }
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "Rollback failed");
                }
                Err(err)
            }
        }
    }

    /// Run `operation` under the transaction deadline.
    ///
    /// On expiry the operation future is dropped, which drops its unit of
    /// work and rolls it back.
    pub async fn with_deadline<T, F>(&self, operation: &'static str, fut: F) -> ServiceResult<T>
    where
        F: Future<Output = ServiceResult<T>>,
    {
        match tokio::time::timeout(self.transaction_timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    operation,
                    timeout_ms = self.transaction_timeout.as_millis() as u64,
                    "Transaction deadline exceeded"
                );
                Err(DomainError::DatabaseError(format!(
                    "{operation}: transaction deadline of {:?} exceeded",
                    self.transaction_timeout
                ))
                .into())
            }
        }
    }

    /// Close the storage gateway; no operation may run afterwards
    pub async fn shutdown(&self) {
        self.db.close().await;
        info!("Service context shut down");
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("db", &"Database")
            .field("horizon", &self.horizon)
            .field("transaction_timeout", &self.transaction_timeout)
            .finish()
    }
}
