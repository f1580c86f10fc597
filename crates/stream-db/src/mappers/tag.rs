//! Tag model -> entity mapper

use stream_core::entities::Tag;

use crate::models::TagModel;

impl From<TagModel> for Tag {
    fn from(model: TagModel) -> Self {
        Tag {
            id: model.id,
            name: model.name,
        }
    }
}
