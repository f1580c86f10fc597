//! Livecomment / report model -> entity mappers

use stream_core::entities::{Livecomment, LivecommentReport};

use crate::models::{LivecommentModel, LivecommentReportModel};

impl From<LivecommentModel> for Livecomment {
    fn from(model: LivecommentModel) -> Self {
        Livecomment {
            id: model.id,
            user_id: model.user_id,
            livestream_id: model.livestream_id,
            comment: model.comment,
            tip: model.tip,
            created_at: model.created_at,
        }
    }
}

impl From<LivecommentReportModel> for LivecommentReport {
    fn from(model: LivecommentReportModel) -> Self {
        LivecommentReport {
            id: model.id,
            user_id: model.user_id,
            livestream_id: model.livestream_id,
            livecomment_id: model.livecomment_id,
            created_at: model.created_at,
        }
    }
}
