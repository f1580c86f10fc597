//! Livecomment and moderation report entities

/// Livecomment entity as stored in the `livecomments` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Livecomment {
    pub id: i64,
    pub user_id: i64,
    pub livestream_id: i64,
    pub comment: String,
    pub tip: i64,
    pub created_at: i64,
}

/// A viewer's report against a livecomment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LivecommentReport {
    pub id: i64,
    pub user_id: i64,
    pub livestream_id: i64,
    pub livecomment_id: i64,
    pub created_at: i64,
}
