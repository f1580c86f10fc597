//! Livestream model -> entity mappers

use stream_core::entities::{Livestream, LivestreamTag};

use crate::models::{LivestreamModel, LivestreamTagModel};

/// Convert LivestreamModel to Livestream entity
impl From<LivestreamModel> for Livestream {
    fn from(model: LivestreamModel) -> Self {
        Livestream {
            id: model.id,
            user_id: model.user_id,
            title: model.title,
            description: model.description,
            playlist_url: model.playlist_url,
            thumbnail_url: model.thumbnail_url,
            start_at: model.start_at,
            end_at: model.end_at,
        }
    }
}

/// Convert LivestreamTagModel to LivestreamTag entity
impl From<LivestreamTagModel> for LivestreamTag {
    fn from(model: LivestreamTagModel) -> Self {
        LivestreamTag {
            id: model.id,
            livestream_id: model.livestream_id,
            tag_id: model.tag_id,
        }
    }
}
