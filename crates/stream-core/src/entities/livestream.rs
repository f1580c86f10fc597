//! Livestream entity - a reservation of the streaming schedule

use crate::value_objects::ReservationWindow;

/// Livestream entity as stored in the `livestreams` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Livestream {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub playlist_url: String,
    pub thumbnail_url: String,
    pub start_at: i64,
    pub end_at: i64,
}

impl Livestream {
    /// Check if the given user owns this livestream
    #[inline]
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }

    /// The reserved window of this livestream
    pub fn window(&self) -> ReservationWindow {
        ReservationWindow::new(self.start_at, self.end_at)
    }
}

/// Values for a livestream that has not been inserted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLivestream {
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub playlist_url: String,
    pub thumbnail_url: String,
    pub start_at: i64,
    pub end_at: i64,
}

impl NewLivestream {
    /// Attach the generated id
    pub fn into_livestream(self, id: i64) -> Livestream {
        Livestream {
            id,
            user_id: self.user_id,
            title: self.title,
            description: self.description,
            playlist_url: self.playlist_url,
            thumbnail_url: self.thumbnail_url,
            start_at: self.start_at,
            end_at: self.end_at,
        }
    }
}

/// Join row between a livestream and a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LivestreamTag {
    pub id: i64,
    pub livestream_id: i64,
    pub tag_id: i64,
}

/// Viewer history row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LivestreamViewer {
    pub user_id: i64,
    pub livestream_id: i64,
    pub created_at: i64,
}
