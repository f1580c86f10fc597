//! Reservation slot model -> entity mapper

use stream_core::entities::ReservationSlot;

use crate::models::ReservationSlotModel;

impl From<ReservationSlotModel> for ReservationSlot {
    fn from(model: ReservationSlotModel) -> Self {
        ReservationSlot {
            id: model.id,
            slot: model.slot,
            start_at: model.start_at,
            end_at: model.end_at,
        }
    }
}
