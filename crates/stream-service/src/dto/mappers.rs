//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.
//! Nested responses are built from `*With*` helper structs carrying the
//! already-resolved children, so the single-entity and bulk paths share one
//! conversion.

use stream_core::entities::{
    Livecomment, LivecommentReport, Livestream, Reaction, Tag, Theme, User,
};

use super::responses::{
    LivecommentReportResponse, LivecommentResponse, LivestreamResponse, ReactionResponse,
    TagResponse, ThemeResponse, UserResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&Theme> for ThemeResponse {
    fn from(theme: &Theme) -> Self {
        Self {
            id: theme.id,
            dark_mode: theme.dark_mode,
        }
    }
}

/// User with their theme (helper struct for mapping)
pub struct UserWithTheme {
    pub user: User,
    pub theme: Theme,
}

impl From<UserWithTheme> for UserResponse {
    fn from(uwt: UserWithTheme) -> Self {
        Self {
            id: uwt.user.id,
            name: uwt.user.name,
            display_name: uwt.user.display_name,
            description: uwt.user.description,
            theme: ThemeResponse::from(&uwt.theme),
        }
    }
}

// ============================================================================
// Livestream Mappers
// ============================================================================

impl From<&Tag> for TagResponse {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name.clone(),
        }
    }
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
        }
    }
}

/// Livestream with resolved owner and tags (helper struct for mapping)
pub struct LivestreamWithDetails {
    pub livestream: Livestream,
    pub owner: UserResponse,
    pub tags: Vec<TagResponse>,
}

impl From<LivestreamWithDetails> for LivestreamResponse {
    fn from(details: LivestreamWithDetails) -> Self {
        Self {
            id: details.livestream.id,
            owner: details.owner,
            title: details.livestream.title,
            description: details.livestream.description,
            playlist_url: details.livestream.playlist_url,
            thumbnail_url: details.livestream.thumbnail_url,
            tags: details.tags,
            start_at: details.livestream.start_at,
            end_at: details.livestream.end_at,
        }
    }
}

// ============================================================================
// Reaction Mappers
// ============================================================================

/// Reaction with resolved user and livestream (helper struct for mapping)
pub struct ReactionWithDetails {
    pub reaction: Reaction,
    pub user: UserResponse,
    pub livestream: LivestreamResponse,
}

impl From<ReactionWithDetails> for ReactionResponse {
    fn from(details: ReactionWithDetails) -> Self {
        Self {
            id: details.reaction.id,
            emoji_name: details.reaction.emoji_name,
            user: details.user,
            livestream: details.livestream,
            created_at: details.reaction.created_at,
        }
    }
}

// ============================================================================
// Moderation Mappers
// ============================================================================

/// Livecomment with resolved author and livestream (helper struct for mapping)
pub struct LivecommentWithDetails {
    pub livecomment: Livecomment,
    pub user: UserResponse,
    pub livestream: LivestreamResponse,
}

impl From<LivecommentWithDetails> for LivecommentResponse {
    fn from(details: LivecommentWithDetails) -> Self {
        Self {
            id: details.livecomment.id,
            user: details.user,
            livestream: details.livestream,
            comment: details.livecomment.comment,
            tip: details.livecomment.tip,
            created_at: details.livecomment.created_at,
        }
    }
}

/// Report with resolved reporter and livecomment (helper struct for mapping)
pub struct ReportWithDetails {
    pub report: LivecommentReport,
    pub reporter: UserResponse,
    pub livecomment: LivecommentResponse,
}

impl From<ReportWithDetails> for LivecommentReportResponse {
    fn from(details: ReportWithDetails) -> Self {
        Self {
            id: details.report.id,
            reporter: details.reporter,
            livecomment: details.livecomment,
            created_at: details.report.created_at,
        }
    }
}
