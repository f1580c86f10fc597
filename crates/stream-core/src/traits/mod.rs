//! Storage ports implemented by the infrastructure layer

mod repositories;

pub use repositories::{
    Database, LivecommentRepository, LivestreamRepository, ReactionRepository, RepoResult,
    ReservationSlotRepository, TagRepository, UnitOfWork, UserRepository,
};
