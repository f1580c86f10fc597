//! Request DTOs
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::{Validate, ValidationError};

// ============================================================================
// Livestream Requests
// ============================================================================

/// Reserve a livestream over a time window
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_window"))]
pub struct ReserveLivestreamRequest {
    /// Tag ids to attach; duplicates are collapsed
    #[serde(default)]
    pub tags: Vec<i64>,

    #[validate(length(max = 255, message = "Title must be at most 255 characters"))]
    pub title: String,

    pub description: String,

    #[validate(length(max = 255, message = "Playlist URL must be at most 255 characters"))]
    pub playlist_url: String,

    #[validate(length(max = 255, message = "Thumbnail URL must be at most 255 characters"))]
    pub thumbnail_url: String,

    /// UNIX seconds
    pub start_at: i64,

    /// UNIX seconds
    pub end_at: i64,
}

fn validate_window(req: &ReserveLivestreamRequest) -> Result<(), ValidationError> {
    if req.start_at < req.end_at {
        Ok(())
    } else {
        Err(ValidationError::new("window")
            .with_message("start_at must be before end_at".into()))
    }
}

/// Livestream search parameters
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SearchLivestreamsQuery {
    /// Only livestreams carrying a tag with this name
    pub tag: Option<String>,

    /// Only applies when `tag` is absent; zero yields an empty page
    #[validate(range(min = 0, message = "Limit must not be negative"))]
    pub limit: Option<i64>,
}

// ============================================================================
// Reaction Requests
// ============================================================================

/// Post a reaction on a livestream
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PostReactionRequest {
    #[validate(length(min = 1, max = 255, message = "Emoji name must be 1-255 characters"))]
    pub emoji_name: String,
}

/// Reaction listing parameters
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ListReactionsQuery {
    #[validate(range(min = 0, message = "Limit must not be negative"))]
    pub limit: Option<i64>,
}
