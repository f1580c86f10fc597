//! Livestream database models

use sqlx::FromRow;

/// Database model for livestreams table
#[derive(Debug, Clone, FromRow)]
pub struct LivestreamModel {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub playlist_url: String,
    pub thumbnail_url: String,
    pub start_at: i64,
    pub end_at: i64,
}

/// Database model for livestream_tags table
#[derive(Debug, Clone, FromRow)]
pub struct LivestreamTagModel {
    pub id: i64,
    pub livestream_id: i64,
    pub tag_id: i64,
}
