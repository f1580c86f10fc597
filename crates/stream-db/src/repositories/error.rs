//! Error handling utilities for repositories

use sqlx::Error as SqlxError;
use stream_core::error::DomainError;

/// SQLSTATE raised when `lock_timeout` expires
const LOCK_NOT_AVAILABLE: &str = "55P03";

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.code().as_deref() == Some(LOCK_NOT_AVAILABLE) {
            return DomainError::DatabaseError(format!("lock timeout: {db_err}"));
        }
    }
    DomainError::DatabaseError(e.to_string())
}
