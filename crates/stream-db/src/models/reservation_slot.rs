//! Reservation slot database model

use sqlx::FromRow;

/// Database model for reservation_slots table
#[derive(Debug, Clone, FromRow)]
pub struct ReservationSlotModel {
    pub id: i64,
    pub slot: i64,
    pub start_at: i64,
    pub end_at: i64,
}
