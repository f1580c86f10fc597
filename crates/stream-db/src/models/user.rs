//! User database models

use sqlx::FromRow;

/// Database model for users table (password column is never selected)
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub name: String,
    pub display_name: String,
    pub description: String,
}

/// Database model for themes table
#[derive(Debug, Clone, FromRow)]
pub struct ThemeModel {
    pub id: i64,
    pub user_id: i64,
    pub dark_mode: bool,
}
