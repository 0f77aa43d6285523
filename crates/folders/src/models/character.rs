//! Character model identifying the active organizing context

use serde::{Deserialize, Serialize};

/// Unique identifier for a character (avatar key or display name)
///
/// Folder orderings are scoped per character: two characters never share a
/// folder, and resolving an assignment is always relative to the character
/// the host currently has active.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub String);

impl CharacterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for CharacterId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CharacterId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
