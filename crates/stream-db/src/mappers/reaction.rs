//! Reaction model -> entity mapper

use stream_core::entities::Reaction;

use crate::models::ReactionModel;

/// Convert ReactionModel to Reaction entity
impl From<ReactionModel> for Reaction {
    fn from(model: ReactionModel) -> Self {
        Reaction {
            id: model.id,
            emoji_name: model.emoji_name,
            user_id: model.user_id,
            livestream_id: model.livestream_id,
            created_at: model.created_at,
        }
    }
}
