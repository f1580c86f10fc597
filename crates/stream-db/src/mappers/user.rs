//! User / Theme model -> entity mapper

use stream_core::entities::{Theme, User};

use crate::models::{ThemeModel, UserModel};

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: model.id,
            name: model.name,
            display_name: model.display_name,
            description: model.description,
        }
    }
}

/// Convert ThemeModel to Theme entity
impl From<ThemeModel> for Theme {
    fn from(model: ThemeModel) -> Self {
        Theme {
            id: model.id,
            user_id: model.user_id,
            dark_mode: model.dark_mode,
        }
    }
}
