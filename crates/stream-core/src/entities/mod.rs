//! Domain entities - one struct per stored row shape

mod livecomment;
mod livestream;
mod reaction;
mod reservation_slot;
mod tag;
mod user;

pub use livecomment::{Livecomment, LivecommentReport};
pub use livestream::{Livestream, LivestreamTag, LivestreamViewer, NewLivestream};
pub use reaction::{NewReaction, Reaction};
pub use reservation_slot::ReservationSlot;
pub use tag::Tag;
pub use user::{Theme, User};
