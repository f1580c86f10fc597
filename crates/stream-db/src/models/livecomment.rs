//! Livecomment database models

use sqlx::FromRow;

/// Database model for livecomments table
#[derive(Debug, Clone, FromRow)]
pub struct LivecommentModel {
    pub id: i64,
    pub user_id: i64,
    pub livestream_id: i64,
    pub comment: String,
    pub tip: i64,
    pub created_at: i64,
}

/// Database model for livecomment_reports table
#[derive(Debug, Clone, FromRow)]
pub struct LivecommentReportModel {
    pub id: i64,
    pub user_id: i64,
    pub livestream_id: i64,
    pub livecomment_id: i64,
    pub created_at: i64,
}
