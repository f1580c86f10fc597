//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.
//!
//! Every repository method runs inside one open transaction: a [`UnitOfWork`]
//! implements all repositories at once and is obtained from [`Database::begin`].
//! Bulk lookups take deduplicated id slices and must issue a single query.

use async_trait::async_trait;

use crate::entities::{
    Livecomment, LivecommentReport, Livestream, LivestreamTag, LivestreamViewer, NewLivestream,
    NewReaction, Reaction, ReservationSlot, Tag, Theme, User,
};
use crate::error::DomainError;
use crate::value_objects::ReservationWindow;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send {
    /// Find user by ID
    async fn find_user(&mut self, id: i64) -> RepoResult<Option<User>>;

    /// Find user by unique name
    async fn find_user_by_name(&mut self, name: &str) -> RepoResult<Option<User>>;

    /// Find all users whose id is in `ids`
    async fn find_users_by_ids(&mut self, ids: &[i64]) -> RepoResult<Vec<User>>;

    /// Find the theme of a user; the lowest theme id wins when a user has
    /// several
    async fn find_theme_by_user(&mut self, user_id: i64) -> RepoResult<Option<Theme>>;

    /// Find the themes of all users in `user_ids`, ordered by theme id
    async fn find_themes_by_users(&mut self, user_ids: &[i64]) -> RepoResult<Vec<Theme>>;
}

// ============================================================================
// Tag Repository
// ============================================================================

#[async_trait]
pub trait TagRepository: Send {
    /// Find tag by ID
    async fn find_tag(&mut self, id: i64) -> RepoResult<Option<Tag>>;

    /// Find all tags whose id is in `ids`
    async fn find_tags_by_ids(&mut self, ids: &[i64]) -> RepoResult<Vec<Tag>>;

    /// Find the ids of tags with the given name
    async fn find_tag_ids_by_name(&mut self, name: &str) -> RepoResult<Vec<i64>>;
}

// ============================================================================
// Livestream Repository
// ============================================================================

#[async_trait]
pub trait LivestreamRepository: Send {
    /// Find livestream by ID
    async fn find_livestream(&mut self, id: i64) -> RepoResult<Option<Livestream>>;

    /// Find all livestreams whose id is in `ids`
    async fn find_livestreams_by_ids(&mut self, ids: &[i64]) -> RepoResult<Vec<Livestream>>;

    /// List livestreams owned by a user
    async fn find_livestreams_by_user(&mut self, user_id: i64) -> RepoResult<Vec<Livestream>>;

    /// List livestreams newest first, optionally limited
    async fn list_livestreams(&mut self, limit: Option<i64>) -> RepoResult<Vec<Livestream>>;

    /// Insert a livestream and return its generated id
    async fn create_livestream(&mut self, livestream: &NewLivestream) -> RepoResult<i64>;

    /// Tag associations of one livestream
    async fn find_livestream_tags(&mut self, livestream_id: i64)
        -> RepoResult<Vec<LivestreamTag>>;

    /// Tag associations of all livestreams in `livestream_ids`
    async fn find_livestream_tags_by_livestreams(
        &mut self,
        livestream_ids: &[i64],
    ) -> RepoResult<Vec<LivestreamTag>>;

    /// Tag associations referencing any of `tag_ids`, newest livestream first
    async fn find_livestream_tags_by_tags(&mut self, tag_ids: &[i64])
        -> RepoResult<Vec<LivestreamTag>>;

    /// Associate a tag with a livestream
    async fn create_livestream_tag(&mut self, livestream_id: i64, tag_id: i64) -> RepoResult<()>;

    /// Record that a user started watching
    async fn create_viewer(&mut self, viewer: &LivestreamViewer) -> RepoResult<()>;

    /// Remove a user's viewing records for a livestream
    async fn delete_viewer(&mut self, user_id: i64, livestream_id: i64) -> RepoResult<u64>;
}

// ============================================================================
// Reservation Slot Repository
// ============================================================================

#[async_trait]
pub trait ReservationSlotRepository: Send {
    /// Select every slot inside `window` with a row lock held until the
    /// transaction ends. Concurrent callers with overlapping windows block here.
    async fn lock_slots_in_window(
        &mut self,
        window: &ReservationWindow,
    ) -> RepoResult<Vec<ReservationSlot>>;

    /// Current remaining capacity of the slot with exactly these bounds
    async fn slot_capacity(&mut self, start_at: i64, end_at: i64) -> RepoResult<Option<i64>>;

    /// Decrement the capacity of every slot inside `window`, returning the number of rows touched
    async fn decrement_slots_in_window(&mut self, window: &ReservationWindow) -> RepoResult<u64>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send {
    /// Reactions on a livestream, newest first, optionally limited
    async fn find_reactions_by_livestream(
        &mut self,
        livestream_id: i64,
        limit: Option<i64>,
    ) -> RepoResult<Vec<Reaction>>;

    /// Insert a reaction and return its generated id
    async fn create_reaction(&mut self, reaction: &NewReaction) -> RepoResult<i64>;
}

// ============================================================================
// Livecomment Repository
// ============================================================================

#[async_trait]
pub trait LivecommentRepository: Send {
    /// Find livecomment by ID
    async fn find_livecomment(&mut self, id: i64) -> RepoResult<Option<Livecomment>>;

    /// Reports filed against livecomments of a livestream
    async fn find_reports_by_livestream(
        &mut self,
        livestream_id: i64,
    ) -> RepoResult<Vec<LivecommentReport>>;
}

// ============================================================================
// Unit of Work
// ============================================================================

/// One open transaction exposing every repository.
///
/// Dropping a unit of work without calling [`UnitOfWork::commit`] rolls it
/// back and releases any row locks it holds.
#[async_trait]
pub trait UnitOfWork:
    UserRepository
    + TagRepository
    + LivestreamRepository
    + ReservationSlotRepository
    + ReactionRepository
    + LivecommentRepository
{
    /// Make every change of this transaction visible
    async fn commit(self: Box<Self>) -> RepoResult<()>;

    /// Discard every change of this transaction
    async fn rollback(self: Box<Self>) -> RepoResult<()>;
}

/// Storage gateway handle, owned for the lifetime of the process
#[async_trait]
pub trait Database: Send + Sync {
    /// Open a new transaction
    async fn begin(&self) -> RepoResult<Box<dyn UnitOfWork>>;

    /// Close all connections. No transaction may be opened afterwards.
    async fn close(&self);
}
