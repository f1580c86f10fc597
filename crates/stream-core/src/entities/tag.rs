//! Tag entity - immutable lookup referenced by livestreams

/// Tag entity
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

impl Tag {
    /// Create a new Tag
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
