//! Business logic services
//!
//! Every service operation runs in exactly one unit of work under the
//! transaction deadline and commits or rolls back as a whole.

pub mod aggregator;
pub mod context;
pub mod error;
pub mod fetcher;
pub mod livestream;
pub mod reaction;
pub mod report;
pub mod reservation;

// Re-export all services for convenience
pub use context::ServiceContext;
pub use error::{ServiceError, ServiceResult};
pub use livestream::LivestreamService;
pub use reaction::ReactionService;
pub use report::ReportService;
pub use reservation::ReservationService;
