//! Settings storage trait definitions

use crate::models::{CharacterId, ChatId, Folder, FolderId, FolderSettings};
use anyhow::Result;

/// Trait for folder settings storage
///
/// Abstracts over the host's persisted settings object. Implementations hold
/// the settings root with interior mutability; every method leaves the root
/// fully consistent before returning, since a rebuild may be triggered
/// synchronously after any mutation.
pub trait SettingsStore: Send + Sync {
    /// Get a folder record by id
    fn get_folder(&self, id: &FolderId) -> Result<Option<Folder>>;

    /// Insert a new folder record (or replace an existing one)
    fn insert_folder(&self, id: FolderId, folder: Folder) -> Result<()>;

    /// Delete a folder record. Returns false if the id was unknown.
    fn remove_folder(&self, id: &FolderId) -> Result<bool>;

    /// Set a folder's display name. Returns false if the id was unknown.
    fn set_folder_name(&self, id: &FolderId, name: &str) -> Result<bool>;

    /// Set a folder's collapsed flag. Returns false if the id was unknown.
    fn set_collapsed(&self, id: &FolderId, collapsed: bool) -> Result<bool>;

    /// Ordered folder ids for a character (empty when the character has none)
    fn folder_index(&self, character: &CharacterId) -> Result<Vec<FolderId>>;

    /// Append a folder id to a character's ordering
    fn append_to_index(&self, character: &CharacterId, id: FolderId) -> Result<()>;

    /// Remove a folder id from a character's ordering.
    /// Returns false if the id was not in the ordering.
    fn remove_from_index(&self, character: &CharacterId, id: &FolderId) -> Result<bool>;

    /// Append a chat to a folder's item set.
    /// Returns false if the folder id was unknown.
    fn add_chat(&self, id: &FolderId, chat: &ChatId) -> Result<bool>;

    /// Remove a chat from every folder in the character's ordering
    fn remove_chat_for_character(&self, character: &CharacterId, chat: &ChatId) -> Result<()>;

    /// Clone of the full settings root (for saving and tests)
    fn snapshot(&self) -> Result<FolderSettings>;

    /// Replace the full settings root (for loading)
    fn replace(&self, settings: FolderSettings) -> Result<()>;

    /// Ask the backend to persist soon. Fire-and-forget; persistent backends
    /// debounce internally, in-memory backends just count the request.
    fn request_save(&self);
}
