//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in stream-core.
//! Every port is implemented on [`PgUnitOfWork`], so all statements of one
//! operation share a single transaction; each file covers one port.

mod error;
mod livecomment;
mod livestream;
mod reaction;
mod reservation_slot;
mod tag;
mod unit_of_work;
mod user;

pub use error::map_db_error;
pub use unit_of_work::{PgDatabase, PgUnitOfWork};
