//! Folder model grouping chats under a character

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a folder
///
/// Generated once at creation and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FolderId(pub String);

impl FolderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh opaque folder id
    pub fn generate() -> Self {
        Self(format!("folder_{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for FolderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for FolderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A user-created folder holding chat assignments for one character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Folder {
    /// Display name, non-empty and trimmed
    pub name: String,
    /// Chats assigned to this folder, in assignment order.
    /// A chat id appears in at most one folder per character; the mutation
    /// protocol enforces this, not the storage layer.
    #[serde(default)]
    pub chats: Vec<super::ChatId>,
    /// Whether the section renders with its content region hidden
    #[serde(default)]
    pub collapsed: bool,
    /// Rank among the character's folders
    #[serde(default)]
    pub order: u32,
    /// When the folder was created
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Folder {
    /// Create a new empty folder with the given display name and rank
    pub fn new(name: impl Into<String>, order: u32) -> Self {
        Self {
            name: name.into(),
            chats: Vec::new(),
            collapsed: false,
            order,
            created_at: Utc::now(),
        }
    }

    /// Whether the folder currently holds the given chat
    pub fn contains(&self, chat: &super::ChatId) -> bool {
        self.chats.contains(chat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = FolderId::generate();
        let b = FolderId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("folder_"));
    }

    #[test]
    fn test_new_folder_is_empty_and_expanded() {
        let folder = Folder::new("Arcs", 0);
        assert_eq!(folder.name, "Arcs");
        assert!(folder.chats.is_empty());
        assert!(!folder.collapsed);
        assert_eq!(folder.order, 0);
    }
}
