//! # stream-core
//!
//! Domain layer containing row entities, scheduling value objects, the error
//! taxonomy and the storage ports (repositories + unit of work).
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Livecomment, LivecommentReport, Livestream, LivestreamTag, LivestreamViewer, NewLivestream,
    NewReaction, Reaction, ReservationSlot, Tag, Theme, User,
};
pub use error::DomainError;
pub use traits::{
    Database, LivecommentRepository, LivestreamRepository, ReactionRepository, RepoResult,
    ReservationSlotRepository, TagRepository, UnitOfWork, UserRepository,
};
pub use value_objects::{ReservationWindow, SchedulingHorizon};
