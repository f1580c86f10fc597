//! Scheduling value objects
//!
//! All instants are UNIX seconds. Windows and the horizon are half-open
//! `[start, end)` ranges.

use crate::error::DomainError;

/// 2023-11-25 01:00:00 UTC
const DEFAULT_HORIZON_START: i64 = 1_700_874_000;
/// 2024-11-25 01:00:00 UTC
const DEFAULT_HORIZON_END: i64 = 1_732_496_400;

/// A requested `[start_at, end_at)` reservation window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReservationWindow {
    pub start_at: i64,
    pub end_at: i64,
}

impl ReservationWindow {
    /// Create a new window. Ordering of the bounds is checked by request validation.
    #[inline]
    pub const fn new(start_at: i64, end_at: i64) -> Self {
        Self { start_at, end_at }
    }

    /// Whether a slot `[start_at, end_at)` lies inside this window
    #[inline]
    pub fn contains_slot(&self, start_at: i64, end_at: i64) -> bool {
        start_at >= self.start_at && end_at <= self.end_at
    }
}

/// The global range every reservation must fall into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulingHorizon {
    start_at: i64,
    end_at: i64,
}

impl SchedulingHorizon {
    /// Create a horizon, rejecting empty or inverted ranges
    pub fn new(start_at: i64, end_at: i64) -> Result<Self, DomainError> {
        if start_at >= end_at {
            return Err(DomainError::ValidationError(format!(
                "scheduling horizon start {start_at} must precede end {end_at}"
            )));
        }
        Ok(Self { start_at, end_at })
    }

    /// Horizon start (UNIX seconds)
    #[inline]
    pub fn start_at(&self) -> i64 {
        self.start_at
    }

    /// Horizon end (UNIX seconds)
    #[inline]
    pub fn end_at(&self) -> i64 {
        self.end_at
    }

    /// Check that a window may be reserved inside this horizon.
    ///
    /// A window starting at or after the horizon end, or ending at or before
    /// the horizon start, is rejected. Touching the start with the window
    /// start is accepted.
    pub fn admit(&self, window: &ReservationWindow) -> Result<(), DomainError> {
        if window.start_at >= self.end_at || window.end_at <= self.start_at {
            return Err(DomainError::BadWindow {
                start_at: window.start_at,
                end_at: window.end_at,
            });
        }
        Ok(())
    }
}

impl Default for SchedulingHorizon {
    /// One year starting 2023-11-25 01:00 UTC
    fn default() -> Self {
        Self {
            start_at: DEFAULT_HORIZON_START,
            end_at: DEFAULT_HORIZON_END,
        }
    }
}
