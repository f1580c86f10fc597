//! User entity - an account owned by the authentication subsystem
//!
//! Users are only ever read here; registration and credentials live elsewhere.

/// User entity as stored in the `users` table (credentials excluded)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub display_name: String,
    pub description: String,
}

/// Per-user display theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub id: i64,
    pub user_id: i64,
    pub dark_mode: bool,
}

impl User {
    /// Create a new User
    pub fn new(id: i64, name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            display_name: display_name.into(),
            description: String::new(),
        }
    }

    /// Set the profile description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl Theme {
    /// Create a new Theme
    pub fn new(id: i64, user_id: i64, dark_mode: bool) -> Self {
        Self {
            id,
            user_id,
            dark_mode,
        }
    }
}
