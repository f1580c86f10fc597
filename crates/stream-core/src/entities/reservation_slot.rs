//! Reservation slot entity - a fixed calendar interval with a capacity counter

/// One pre-seeded `[start_at, end_at)` interval.
///
/// `slot` is the remaining capacity. It never goes below zero and is only
/// decremented by a transaction holding the row lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationSlot {
    pub id: i64,
    pub slot: i64,
    pub start_at: i64,
    pub end_at: i64,
}

impl ReservationSlot {
    /// Create a new ReservationSlot
    pub fn new(id: i64, slot: i64, start_at: i64, end_at: i64) -> Self {
        Self {
            id,
            slot,
            start_at,
            end_at,
        }
    }

    /// Whether at least one more reservation fits
    #[inline]
    pub fn has_capacity(&self) -> bool {
        self.slot >= 1
    }
}
