//! In-memory storage gateway
//!
//! Implements every storage port over process-local tables so service
//! behaviour can be tested without PostgreSQL:
//!
//! - each unit of work reads a private snapshot taken at `begin` and buffers
//!   its writes; `commit` replays them onto the shared tables
//! - `lock_slots_in_window` takes one async mutex per slot row, in id order,
//!   held until the unit of work is committed or dropped, then re-reads the
//!   locked rows from the shared tables
//! - every statement that would reach the database bumps a query counter
//! - failures and latency can be injected per repository method

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use stream_core::entities::{
    Livecomment, LivecommentReport, Livestream, LivestreamTag, LivestreamViewer, NewLivestream,
    NewReaction, Reaction, ReservationSlot, Tag, Theme, User,
};
use stream_core::traits::{
    Database, LivecommentRepository, LivestreamRepository, ReactionRepository, RepoResult,
    ReservationSlotRepository, TagRepository, UnitOfWork, UserRepository,
};
use stream_core::value_objects::ReservationWindow;
use stream_core::DomainError;

#[derive(Debug, Clone, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    themes: BTreeMap<i64, Theme>,
    tags: BTreeMap<i64, Tag>,
    livestreams: BTreeMap<i64, Livestream>,
    livestream_tags: Vec<LivestreamTag>,
    viewers: Vec<LivestreamViewer>,
    slots: BTreeMap<i64, ReservationSlot>,
    reactions: Vec<Reaction>,
    livecomments: BTreeMap<i64, Livecomment>,
    reports: Vec<LivecommentReport>,
}

/// A buffered write, replayed on commit
#[derive(Debug, Clone)]
enum Mutation {
    DecrementSlots(ReservationWindow),
    InsertLivestream(Livestream),
    InsertLivestreamTag(LivestreamTag),
    InsertViewer(LivestreamViewer),
    DeleteViewer { user_id: i64, livestream_id: i64 },
    InsertReaction(Reaction),
}

impl Tables {
    fn apply(&mut self, mutation: &Mutation) {
        match mutation {
            Mutation::DecrementSlots(window) => {
                for slot in self.slots.values_mut() {
                    if window.contains_slot(slot.start_at, slot.end_at) {
                        slot.slot -= 1;
                    }
                }
            }
            Mutation::InsertLivestream(livestream) => {
                self.livestreams.insert(livestream.id, livestream.clone());
            }
            Mutation::InsertLivestreamTag(link) => self.livestream_tags.push(*link),
            Mutation::InsertViewer(viewer) => self.viewers.push(*viewer),
            Mutation::DeleteViewer {
                user_id,
                livestream_id,
            } => self
                .viewers
                .retain(|v| !(v.user_id == *user_id && v.livestream_id == *livestream_id)),
            Mutation::InsertReaction(reaction) => self.reactions.push(reaction.clone()),
        }
    }

    fn count_deleted_viewers(&self, user_id: i64, livestream_id: i64) -> u64 {
        self.viewers
            .iter()
            .filter(|v| v.user_id == user_id && v.livestream_id == livestream_id)
            .count() as u64
    }
}

struct Shared {
    tables: RwLock<Tables>,
    slot_locks: DashMap<i64, Arc<AsyncMutex<()>>>,
    queries: AtomicUsize,
    next_id: AtomicI64,
    closed: AtomicBool,
    failures: Mutex<HashSet<&'static str>>,
    stalls: Mutex<HashMap<&'static str, Duration>>,
}

impl Shared {
    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

/// Process-local storage gateway with row-lock emulation
#[derive(Clone)]
pub struct MemoryDatabase {
    shared: Arc<Shared>,
}

impl Default for MemoryDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                tables: RwLock::new(Tables::default()),
                slot_locks: DashMap::new(),
                queries: AtomicUsize::new(0),
                next_id: AtomicI64::new(1),
                closed: AtomicBool::new(false),
                failures: Mutex::new(HashSet::new()),
                stalls: Mutex::new(HashMap::new()),
            }),
        }
    }

    // === Instrumentation ===

    /// Statements issued since creation or the last reset
    pub fn queries(&self) -> usize {
        self.shared.queries.load(Ordering::SeqCst)
    }

    pub fn reset_queries(&self) {
        self.shared.queries.store(0, Ordering::SeqCst);
    }

    /// Make every call of `method` fail with a storage error
    pub fn fail_on(&self, method: &'static str) {
        self.shared.failures.lock().insert(method);
    }

    /// Delay every call of `method` by `delay`
    pub fn stall_on(&self, method: &'static str, delay: Duration) {
        self.shared.stalls.lock().insert(method, delay);
    }

    /// Remove all injected failures and delays
    pub fn heal(&self) {
        self.shared.failures.lock().clear();
        self.shared.stalls.lock().clear();
    }

    pub fn is_closed(&self) -> bool {
        self.shared.closed.load(Ordering::SeqCst)
    }

    // === Seeding (committed immediately) ===
    //
    // Seeded rows bypass units of work: they land in the committed tables at
    // once and are visible to every unit of work begun afterwards, but not
    // to one already open. All ids come from one shared sequence, so ids are
    // unique across tables and increase in insertion order.

    /// Insert a user together with one theme row.
    ///
    /// The user gets a derived display name and description. Returns the
    /// user id.
    pub fn add_user(&self, name: &str, dark_mode: bool) -> i64 {
        let id = self.add_user_without_theme(name);
        self.add_theme(id, dark_mode);
        id
    }

    /// Insert a user with no theme row.
    ///
    /// Rendering such a user fails with a dangling `theme` reference.
    pub fn add_user_without_theme(&self, name: &str) -> i64 {
        let id = self.shared.next_id();
        let user = User::new(id, name, format!("{name} (display)"))
            .with_description(format!("I am {name}"));
        self.shared.tables.write().users.insert(id, user);
        id
    }

    /// Insert an extra theme row for `user_id` and return its id.
    ///
    /// Lookups resolve a user's theme to the lowest theme id, so a theme
    /// added after [`add_user`](Self::add_user) never shows up in renders.
    pub fn add_theme(&self, user_id: i64, dark_mode: bool) -> i64 {
        let id = self.shared.next_id();
        self.shared
            .tables
            .write()
            .themes
            .insert(id, Theme::new(id, user_id, dark_mode));
        id
    }

    /// Insert a tag named `name` and return its id.
    ///
    /// Names are not checked for uniqueness; callers pass distinct names.
    pub fn add_tag(&self, name: &str) -> i64 {
        let id = self.shared.next_id();
        self.shared.tables.write().tags.insert(id, Tag::new(id, name));
        id
    }

    /// Insert a reservation slot over `[start_at, end_at)` holding
    /// `capacity` remaining reservations, and return its id.
    pub fn add_slot(&self, start_at: i64, end_at: i64, capacity: i64) -> i64 {
        let id = self.shared.next_id();
        self.shared
            .tables
            .write()
            .slots
            .insert(id, ReservationSlot::new(id, capacity, start_at, end_at));
        id
    }

    /// Insert a livestream owned by `user_id` over `[start_at, end_at)`.
    ///
    /// Description and media URLs are derived from the title and id. No
    /// slot capacity is consumed; use the reservation service for that.
    pub fn add_livestream(&self, user_id: i64, title: &str, start_at: i64, end_at: i64) -> i64 {
        let id = self.shared.next_id();
        let livestream = NewLivestream {
            user_id,
            title: title.to_string(),
            description: format!("{title} description"),
            playlist_url: format!("https://media.example.com/{id}/playlist.m3u8"),
            thumbnail_url: format!("https://media.example.com/{id}/thumbnail.jpg"),
            start_at,
            end_at,
        }
        .into_livestream(id);
        self.shared.tables.write().livestreams.insert(id, livestream);
        id
    }

    /// Attach `tag_id` to `livestream_id`.
    ///
    /// Join rows keep insertion order, which is the order tags render in.
    /// Neither id is checked, so this can seed dangling tag references.
    pub fn tag_livestream(&self, livestream_id: i64, tag_id: i64) {
        let id = self.shared.next_id();
        self.shared.tables.write().livestream_tags.push(LivestreamTag {
            id,
            livestream_id,
            tag_id,
        });
    }

    /// Insert a reaction by `user_id` on `livestream_id` posted at
    /// `created_at`, and return its id.
    ///
    /// Listing orders reactions by `created_at`, so seeding out of time order
    /// is how tests check the sort.
    pub fn add_reaction(
        &self,
        user_id: i64,
        livestream_id: i64,
        emoji_name: &str,
        created_at: i64,
    ) -> i64 {
        let id = self.shared.next_id();
        self.shared.tables.write().reactions.push(Reaction {
            id,
            emoji_name: emoji_name.to_string(),
            user_id,
            livestream_id,
            created_at,
        });
        id
    }

    /// Insert a livecomment carrying `tip` and return its id.
    ///
    /// The creation time is derived from the id, so later comments are newer.
    pub fn add_livecomment(&self, user_id: i64, livestream_id: i64, comment: &str, tip: i64) -> i64 {
        let id = self.shared.next_id();
        self.shared.tables.write().livecomments.insert(
            id,
            Livecomment {
                id,
                user_id,
                livestream_id,
                comment: comment.to_string(),
                tip,
                created_at: 1_700_900_000 + id,
            },
        );
        id
    }

    /// Insert a moderation report by `user_id` against `livecomment_id` on
    /// `livestream_id`, and return its id.
    ///
    /// The comment is not required to belong to the livestream.
    pub fn add_report(&self, user_id: i64, livestream_id: i64, livecomment_id: i64) -> i64 {
        let id = self.shared.next_id();
        self.shared.tables.write().reports.push(LivecommentReport {
            id,
            user_id,
            livestream_id,
            livecomment_id,
            created_at: 1_700_950_000 + id,
        });
        id
    }

    /// Remove a user row, leaving references to it dangling.
    ///
    /// The user's theme rows stay behind.
    pub fn remove_user(&self, user_id: i64) {
        self.shared.tables.write().users.remove(&user_id);
    }

    /// Remove a tag row, leaving join rows to it dangling
    pub fn remove_tag(&self, tag_id: i64) {
        self.shared.tables.write().tags.remove(&tag_id);
    }

    // === Inspection of committed state ===
    //
    // These read the committed tables only; writes buffered in an open unit
    // of work are invisible until it commits.

    /// Remaining capacity of a slot, or `None` if no such slot exists
    pub fn slot_capacity(&self, slot_id: i64) -> Option<i64> {
        self.shared.tables.read().slots.get(&slot_id).map(|s| s.slot)
    }

    /// Number of livestream rows, seeded and reserved alike
    pub fn livestream_count(&self) -> usize {
        self.shared.tables.read().livestreams.len()
    }

    /// Number of livestream-to-tag join rows, duplicates included
    pub fn livestream_tag_count(&self) -> usize {
        self.shared.tables.read().livestream_tags.len()
    }

    /// Viewer history rows for one livestream.
    ///
    /// Each enter adds a row and an exit removes all of the viewer's rows, so
    /// this counts visits rather than distinct viewers.
    pub fn viewer_count(&self, livestream_id: i64) -> usize {
        self.shared
            .tables
            .read()
            .viewers
            .iter()
            .filter(|v| v.livestream_id == livestream_id)
            .count()
    }

    /// Number of reaction rows across all livestreams
    pub fn reaction_count(&self) -> usize {
        self.shared.tables.read().reactions.len()
    }
}

#[async_trait]
impl Database for MemoryDatabase {
    async fn begin(&self) -> RepoResult<Box<dyn UnitOfWork>> {
        if self.is_closed() {
            return Err(DomainError::DatabaseError("pool closed".to_string()));
        }

        let snapshot = self.shared.tables.read().clone();
        Ok(Box::new(MemoryUnitOfWork {
            shared: Arc::clone(&self.shared),
            working: snapshot,
            log: Vec::new(),
            held: HashMap::new(),
        }))
    }

    async fn close(&self) {
        self.shared.closed.store(true, Ordering::SeqCst);
    }
}

/// One in-memory transaction
pub struct MemoryUnitOfWork {
    shared: Arc<Shared>,
    working: Tables,
    log: Vec<Mutation>,
    held: HashMap<i64, OwnedMutexGuard<()>>,
}

impl MemoryUnitOfWork {
    fn injected(&self, method: &'static str) -> RepoResult<()> {
        if self.shared.failures.lock().contains(method) {
            return Err(DomainError::DatabaseError(format!(
                "injected failure in {method}"
            )));
        }
        Ok(())
    }

    /// Account for one statement
    async fn query(&self, method: &'static str) -> RepoResult<()> {
        self.shared.queries.fetch_add(1, Ordering::SeqCst);

        let stall = self.shared.stalls.lock().get(method).copied();
        if let Some(delay) = stall {
            tokio::time::sleep(delay).await;
        }

        self.injected(method)
    }

    fn mutate(&mut self, mutation: Mutation) {
        self.working.apply(&mutation);
        self.log.push(mutation);
    }
}

#[async_trait]
impl UserRepository for MemoryUnitOfWork {
    async fn find_user(&mut self, id: i64) -> RepoResult<Option<User>> {
        self.query("find_user").await?;
        Ok(self.working.users.get(&id).cloned())
    }

    async fn find_user_by_name(&mut self, name: &str) -> RepoResult<Option<User>> {
        self.query("find_user_by_name").await?;
        Ok(self.working.users.values().find(|u| u.name == name).cloned())
    }

    async fn find_users_by_ids(&mut self, ids: &[i64]) -> RepoResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.query("find_users_by_ids").await?;
        Ok(self
            .working
            .users
            .values()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn find_theme_by_user(&mut self, user_id: i64) -> RepoResult<Option<Theme>> {
        self.query("find_theme_by_user").await?;
        Ok(self
            .working
            .themes
            .values()
            .find(|t| t.user_id == user_id)
            .copied())
    }

    async fn find_themes_by_users(&mut self, user_ids: &[i64]) -> RepoResult<Vec<Theme>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.query("find_themes_by_users").await?;
        Ok(self
            .working
            .themes
            .values()
            .filter(|t| user_ids.contains(&t.user_id))
            .copied()
            .collect())
    }
}

#[async_trait]
impl TagRepository for MemoryUnitOfWork {
    async fn find_tag(&mut self, id: i64) -> RepoResult<Option<Tag>> {
        self.query("find_tag").await?;
        Ok(self.working.tags.get(&id).cloned())
    }

    async fn find_tags_by_ids(&mut self, ids: &[i64]) -> RepoResult<Vec<Tag>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.query("find_tags_by_ids").await?;
        Ok(self
            .working
            .tags
            .values()
            .filter(|t| ids.contains(&t.id))
            .cloned()
            .collect())
    }

    async fn find_tag_ids_by_name(&mut self, name: &str) -> RepoResult<Vec<i64>> {
        self.query("find_tag_ids_by_name").await?;
        Ok(self
            .working
            .tags
            .values()
            .filter(|t| t.name == name)
            .map(|t| t.id)
            .collect())
    }
}

#[async_trait]
impl LivestreamRepository for MemoryUnitOfWork {
    async fn find_livestream(&mut self, id: i64) -> RepoResult<Option<Livestream>> {
        self.query("find_livestream").await?;
        Ok(self.working.livestreams.get(&id).cloned())
    }

    async fn find_livestreams_by_ids(&mut self, ids: &[i64]) -> RepoResult<Vec<Livestream>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.query("find_livestreams_by_ids").await?;
        Ok(self
            .working
            .livestreams
            .values()
            .filter(|l| ids.contains(&l.id))
            .cloned()
            .collect())
    }

    async fn find_livestreams_by_user(&mut self, user_id: i64) -> RepoResult<Vec<Livestream>> {
        self.query("find_livestreams_by_user").await?;
        Ok(self
            .working
            .livestreams
            .values()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_livestreams(&mut self, limit: Option<i64>) -> RepoResult<Vec<Livestream>> {
        self.query("list_livestreams").await?;
        let limit = limit.map_or(usize::MAX, |l| l.max(0) as usize);
        Ok(self
            .working
            .livestreams
            .values()
            .rev()
            .take(limit)
            .cloned()
            .collect())
    }

    async fn create_livestream(&mut self, livestream: &NewLivestream) -> RepoResult<i64> {
        self.query("create_livestream").await?;
        let id = self.shared.next_id();
        self.mutate(Mutation::InsertLivestream(
            livestream.clone().into_livestream(id),
        ));
        Ok(id)
    }

    async fn find_livestream_tags(
        &mut self,
        livestream_id: i64,
    ) -> RepoResult<Vec<LivestreamTag>> {
        self.query("find_livestream_tags").await?;
        Ok(self
            .working
            .livestream_tags
            .iter()
            .filter(|t| t.livestream_id == livestream_id)
            .copied()
            .collect())
    }

    async fn find_livestream_tags_by_livestreams(
        &mut self,
        livestream_ids: &[i64],
    ) -> RepoResult<Vec<LivestreamTag>> {
        if livestream_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.query("find_livestream_tags_by_livestreams").await?;
        Ok(self
            .working
            .livestream_tags
            .iter()
            .filter(|t| livestream_ids.contains(&t.livestream_id))
            .copied()
            .collect())
    }

    async fn find_livestream_tags_by_tags(
        &mut self,
        tag_ids: &[i64],
    ) -> RepoResult<Vec<LivestreamTag>> {
        if tag_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.query("find_livestream_tags_by_tags").await?;
        let mut links: Vec<LivestreamTag> = self
            .working
            .livestream_tags
            .iter()
            .filter(|t| tag_ids.contains(&t.tag_id))
            .copied()
            .collect();
        links.sort_by(|a, b| b.livestream_id.cmp(&a.livestream_id));
        Ok(links)
    }

    async fn create_livestream_tag(&mut self, livestream_id: i64, tag_id: i64) -> RepoResult<()> {
        self.query("create_livestream_tag").await?;
        let id = self.shared.next_id();
        self.mutate(Mutation::InsertLivestreamTag(LivestreamTag {
            id,
            livestream_id,
            tag_id,
        }));
        Ok(())
    }

    async fn create_viewer(&mut self, viewer: &LivestreamViewer) -> RepoResult<()> {
        self.query("create_viewer").await?;
        self.mutate(Mutation::InsertViewer(*viewer));
        Ok(())
    }

    async fn delete_viewer(&mut self, user_id: i64, livestream_id: i64) -> RepoResult<u64> {
        self.query("delete_viewer").await?;
        let removed = self.working.count_deleted_viewers(user_id, livestream_id);
        self.mutate(Mutation::DeleteViewer {
            user_id,
            livestream_id,
        });
        Ok(removed)
    }
}

#[async_trait]
impl ReservationSlotRepository for MemoryUnitOfWork {
    async fn lock_slots_in_window(
        &mut self,
        window: &ReservationWindow,
    ) -> RepoResult<Vec<ReservationSlot>> {
        self.query("lock_slots_in_window").await?;

        let ids: Vec<i64> = {
            let tables = self.shared.tables.read();
            tables
                .slots
                .values()
                .filter(|s| window.contains_slot(s.start_at, s.end_at))
                .map(|s| s.id)
                .collect()
        };

        // Ascending id order, like the ORDER BY of the SQL gateway
        let mut acquired = Vec::new();
        for id in &ids {
            if self.held.contains_key(id) {
                continue;
            }
            let lock = Arc::clone(self.shared.slot_locks.entry(*id).or_default().value());
            let guard = lock.lock_owned().await;
            self.held.insert(*id, guard);
            acquired.push(*id);
        }

        {
            let tables = self.shared.tables.read();
            for id in &acquired {
                if let Some(slot) = tables.slots.get(id) {
                    self.working.slots.insert(*id, *slot);
                }
            }
        }

        Ok(ids
            .iter()
            .filter_map(|id| self.working.slots.get(id).copied())
            .collect())
    }

    async fn slot_capacity(&mut self, start_at: i64, end_at: i64) -> RepoResult<Option<i64>> {
        self.query("slot_capacity").await?;
        Ok(self
            .working
            .slots
            .values()
            .find(|s| s.start_at == start_at && s.end_at == end_at)
            .map(|s| s.slot))
    }

    async fn decrement_slots_in_window(&mut self, window: &ReservationWindow) -> RepoResult<u64> {
        self.query("decrement_slots_in_window").await?;
        let touched = self
            .working
            .slots
            .values()
            .filter(|s| window.contains_slot(s.start_at, s.end_at))
            .count() as u64;
        self.mutate(Mutation::DecrementSlots(*window));
        Ok(touched)
    }
}

#[async_trait]
impl ReactionRepository for MemoryUnitOfWork {
    async fn find_reactions_by_livestream(
        &mut self,
        livestream_id: i64,
        limit: Option<i64>,
    ) -> RepoResult<Vec<Reaction>> {
        self.query("find_reactions_by_livestream").await?;
        let mut reactions: Vec<Reaction> = self
            .working
            .reactions
            .iter()
            .filter(|r| r.livestream_id == livestream_id)
            .cloned()
            .collect();
        reactions.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        if let Some(limit) = limit {
            reactions.truncate(limit.max(0) as usize);
        }
        Ok(reactions)
    }

    async fn create_reaction(&mut self, reaction: &NewReaction) -> RepoResult<i64> {
        self.query("create_reaction").await?;
        let id = self.shared.next_id();
        self.mutate(Mutation::InsertReaction(reaction.clone().into_reaction(id)));
        Ok(id)
    }
}

#[async_trait]
impl LivecommentRepository for MemoryUnitOfWork {
    async fn find_livecomment(&mut self, id: i64) -> RepoResult<Option<Livecomment>> {
        self.query("find_livecomment").await?;
        Ok(self.working.livecomments.get(&id).cloned())
    }

    async fn find_reports_by_livestream(
        &mut self,
        livestream_id: i64,
    ) -> RepoResult<Vec<LivecommentReport>> {
        self.query("find_reports_by_livestream").await?;
        Ok(self
            .working
            .reports
            .iter()
            .filter(|r| r.livestream_id == livestream_id)
            .copied()
            .collect())
    }
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    async fn commit(self: Box<Self>) -> RepoResult<()> {
        self.injected("commit")?;
        {
            let mut tables = self.shared.tables.write();
            for mutation in &self.log {
                tables.apply(mutation);
            }
        }
        // Row locks are released only after the writes are visible
        drop(self);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> RepoResult<()> {
        drop(self);
        Ok(())
    }
}
