//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Admission Rejections
    // =========================================================================
    #[error("Bad reservation time range: {start_at} ~ {end_at}")]
    BadWindow { start_at: i64, end_at: i64 },

    #[error("Reservation slots exhausted for {start_at} ~ {end_at}")]
    SlotExhausted { start_at: i64, end_at: i64 },

    #[error("Tag not found: {0}")]
    TagNotFound(i64),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Integrity Violations
    // =========================================================================
    #[error("Dangling reference: {entity} {id} does not exist")]
    DanglingReference { entity: &'static str, id: i64 },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadWindow { .. } => "BAD_RESERVATION_WINDOW",
            Self::SlotExhausted { .. } => "RESERVATION_SLOT_EXHAUSTED",
            Self::TagNotFound(_) => "UNKNOWN_TAG",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::DanglingReference { .. } => "DANGLING_REFERENCE",
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    /// Create a dangling reference error
    pub fn dangling(entity: &'static str, id: i64) -> Self {
        Self::DanglingReference { entity, id }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::BadWindow { .. } | Self::TagNotFound(_) | Self::ValidationError(_)
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::SlotExhausted { .. })
    }

    /// Check if the caller caused this error and may retry with different input
    pub fn is_client_error(&self) -> bool {
        self.is_validation() || self.is_conflict()
    }

    /// Check if this is a transient storage failure
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::DatabaseError(_))
    }
}
