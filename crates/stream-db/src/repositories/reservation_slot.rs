//! PostgreSQL implementation of ReservationSlotRepository
//!
//! Slots are selected with `FOR UPDATE`, so overlapping admissions serialize
//! on the row locks until the holder commits or rolls back.

use async_trait::async_trait;
use tracing::instrument;

use stream_core::entities::ReservationSlot;
use stream_core::traits::{RepoResult, ReservationSlotRepository};
use stream_core::value_objects::ReservationWindow;

use crate::models::ReservationSlotModel;

use super::error::map_db_error;
use super::unit_of_work::PgUnitOfWork;

#[async_trait]
impl ReservationSlotRepository for PgUnitOfWork {
    #[instrument(skip(self))]
    async fn lock_slots_in_window(
        &mut self,
        window: &ReservationWindow,
    ) -> RepoResult<Vec<ReservationSlot>> {
        // Fixed lock order keeps overlapping admissions from deadlocking
        let results = sqlx::query_as::<_, ReservationSlotModel>(
            r#"
            SELECT id, slot, start_at, end_at
            FROM reservation_slots
            WHERE start_at >= $1 AND end_at <= $2
            ORDER BY id
            FOR UPDATE
            "#,
        )
        .bind(window.start_at)
        .bind(window.end_at)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ReservationSlot::from).collect())
    }

    #[instrument(skip(self))]
    async fn slot_capacity(&mut self, start_at: i64, end_at: i64) -> RepoResult<Option<i64>> {
        let slot = sqlx::query_scalar::<_, i64>(
            "SELECT slot FROM reservation_slots WHERE start_at = $1 AND end_at = $2",
        )
        .bind(start_at)
        .bind(end_at)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(slot)
    }

    #[instrument(skip(self))]
    async fn decrement_slots_in_window(&mut self, window: &ReservationWindow) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE reservation_slots
            SET slot = slot - 1
            WHERE start_at >= $1 AND end_at <= $2
            "#,
        )
        .bind(window.start_at)
        .bind(window.end_at)
        .execute(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
