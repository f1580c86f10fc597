//! Model to entity mappers
//!
//! `From<Model> for Entity` conversions from database rows to domain objects.

mod livecomment;
mod livestream;
mod reaction;
mod reservation_slot;
mod tag;
mod user;
