//! Database models - SQLx-compatible structs for PostgreSQL tables

mod livecomment;
mod livestream;
mod reaction;
mod reservation_slot;
mod tag;
mod user;

pub use livecomment::{LivecommentModel, LivecommentReportModel};
pub use livestream::{LivestreamModel, LivestreamTagModel};
pub use reaction::ReactionModel;
pub use reservation_slot::ReservationSlotModel;
pub use tag::TagModel;
pub use user::{ThemeModel, UserModel};
