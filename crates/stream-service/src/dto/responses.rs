//! Response DTOs
//!
//! All response DTOs implement `Serialize` for JSON output. Field names and
//! nesting are relied on by existing clients and must not change.

use serde::Serialize;

// ============================================================================
// User Responses
// ============================================================================

/// User with their display theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub theme: ThemeResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemeResponse {
    pub id: i64,
    pub dark_mode: bool,
}

// ============================================================================
// Livestream Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagResponse {
    pub id: i64,
    pub name: String,
}

/// Livestream with its owner and tags resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LivestreamResponse {
    pub id: i64,
    pub owner: UserResponse,
    pub title: String,
    pub description: String,
    pub playlist_url: String,
    pub thumbnail_url: String,
    /// Always present; empty when the livestream has no tags
    pub tags: Vec<TagResponse>,
    pub start_at: i64,
    pub end_at: i64,
}

// ============================================================================
// Reaction Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReactionResponse {
    pub id: i64,
    pub emoji_name: String,
    pub user: UserResponse,
    pub livestream: LivestreamResponse,
    pub created_at: i64,
}

// ============================================================================
// Moderation Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LivecommentResponse {
    pub id: i64,
    pub user: UserResponse,
    pub livestream: LivestreamResponse,
    pub comment: String,
    pub tip: i64,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LivecommentReportResponse {
    pub id: i64,
    pub reporter: UserResponse,
    pub livecomment: LivecommentResponse,
    pub created_at: i64,
}
