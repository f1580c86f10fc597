//! Value objects - immutable types that represent domain concepts

mod schedule;

pub use schedule::{ReservationWindow, SchedulingHorizon};
