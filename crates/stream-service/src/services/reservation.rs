//! Reservation service
//!
//! Admits livestream reservations against the reservation slot counters.
//! Overlapping admissions serialize on the slot row locks; each one
//! re-reads capacity after acquiring them, so a slot is never oversold.

use std::collections::HashSet;

use stream_core::entities::NewLivestream;
use stream_core::traits::{
    LivestreamRepository, ReservationSlotRepository, TagRepository, UnitOfWork,
};
use stream_core::value_objects::ReservationWindow;
use stream_core::DomainError;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{LivestreamResponse, ReserveLivestreamRequest};

use super::aggregator::distinct;
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::fetcher::{dangling, fill_livestream};

/// Reservation service
pub struct ReservationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReservationService<'a> {
    /// Create a new ReservationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Reserve a livestream for `owner_id`.
    ///
    /// Either every slot inside the window is decremented and the livestream
    /// with all its tags is stored, or nothing is.
    #[instrument(skip(self, req), fields(start_at = req.start_at, end_at = req.end_at))]
    pub async fn reserve(
        &self,
        owner_id: i64,
        req: ReserveLivestreamRequest,
    ) -> ServiceResult<LivestreamResponse> {
        req.validate()?;

        let window = ReservationWindow::new(req.start_at, req.end_at);
        if let Err(err) = self.ctx.horizon().admit(&window) {
            warn!(error = %err, "Reservation rejected");
            return Err(err.into());
        }

        self.ctx
            .with_deadline("reserve", async move {
                let mut tx = self.ctx.begin().await?;
                let result = admit(tx.as_mut(), owner_id, window, req).await;
                self.ctx.finish(tx, result).await
            })
            .await
    }
}

async fn admit(
    tx: &mut dyn UnitOfWork,
    owner_id: i64,
    window: ReservationWindow,
    req: ReserveLivestreamRequest,
) -> ServiceResult<LivestreamResponse> {
    let slots = tx.lock_slots_in_window(&window).await?;

    // Capacity seen before the lock was granted may be stale
    for slot in &slots {
        let capacity = tx
            .slot_capacity(slot.start_at, slot.end_at)
            .await?
            .ok_or_else(|| dangling("reservation_slot", slot.id))?;

        if capacity < 1 {
            warn!(
                slot_start = slot.start_at,
                slot_end = slot.end_at,
                "Reservation rejected: slot exhausted"
            );
            return Err(DomainError::SlotExhausted {
                start_at: slot.start_at,
                end_at: slot.end_at,
            }
            .into());
        }
    }

    tx.decrement_slots_in_window(&window).await?;

    let new_livestream = NewLivestream {
        user_id: owner_id,
        title: req.title,
        description: req.description,
        playlist_url: req.playlist_url,
        thumbnail_url: req.thumbnail_url,
        start_at: window.start_at,
        end_at: window.end_at,
    };
    let livestream_id = tx.create_livestream(&new_livestream).await?;

    let tag_ids = distinct(req.tags);
    if !tag_ids.is_empty() {
        let known: HashSet<i64> = tx
            .find_tags_by_ids(&tag_ids)
            .await?
            .into_iter()
            .map(|tag| tag.id)
            .collect();

        if let Some(missing) = tag_ids.iter().find(|id| !known.contains(id)) {
            warn!(tag_id = missing, "Reservation rejected: unknown tag");
            return Err(DomainError::TagNotFound(*missing).into());
        }

        for tag_id in &tag_ids {
            tx.create_livestream_tag(livestream_id, *tag_id).await?;
        }
    }

    let response = fill_livestream(tx, new_livestream.into_livestream(livestream_id)).await?;

    info!(
        livestream_id,
        owner_id,
        slots = slots.len(),
        tags = tag_ids.len(),
        "Livestream reserved"
    );
    Ok(response)
}
