//! Reaction entity - an emoji posted on a livestream

/// Reaction entity as stored in the `reactions` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub id: i64,
    pub emoji_name: String,
    pub user_id: i64,
    pub livestream_id: i64,
    pub created_at: i64,
}

/// Values for a reaction that has not been inserted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReaction {
    pub emoji_name: String,
    pub user_id: i64,
    pub livestream_id: i64,
    pub created_at: i64,
}

impl NewReaction {
    /// Create a new reaction stamped with the current time
    pub fn now(user_id: i64, livestream_id: i64, emoji_name: String) -> Self {
        Self {
            emoji_name,
            user_id,
            livestream_id,
            created_at: chrono::Utc::now().timestamp(),
        }
    }

    /// Attach the generated id
    pub fn into_reaction(self, id: i64) -> Reaction {
        Reaction {
            id,
            emoji_name: self.emoji_name,
            user_id: self.user_id,
            livestream_id: self.livestream_id,
            created_at: self.created_at,
        }
    }
}
