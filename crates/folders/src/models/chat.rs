//! Chat item models as read from the host list view

use serde::{Deserialize, Serialize};

/// Unique identifier for a chat item (the host's file name, e.g. "a.jsonl")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatId(pub String);

impl ChatId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ChatId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ChatId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Opaque reference to an original interactive element in the host view.
///
/// Handles are only valid for the reconciliation pass that produced them;
/// the host may recreate its elements at will, so a handle is never cached
/// across passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryHandle(pub u64);

/// One chat item as snapshotted from the host's native list container.
///
/// Supplied fresh on every reconciliation pass and read-only to the engine.
#[derive(Debug, Clone)]
pub struct ChatEntry {
    /// Identifier attribute of the native block, or its visible text when
    /// the attribute is missing
    pub id: ChatId,
    /// Rendering fragment of the native block, opaque to the engine
    pub preview: String,
    /// Reference to the original activatable element, valid this pass only
    pub handle: EntryHandle,
}

impl ChatEntry {
    pub fn new(id: impl Into<ChatId>, preview: impl Into<String>, handle: EntryHandle) -> Self {
        Self {
            id: id.into(),
            preview: preview.into(),
            handle,
        }
    }
}
