//! In-memory settings storage implementation
//!
//! Used for testing and for embedders whose host owns persistence entirely.

use anyhow::Result;
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::SettingsStore;
use crate::models::{CharacterId, ChatId, Folder, FolderId, FolderSettings};

/// In-memory implementation of SettingsStore
///
/// Holds the settings root behind an RwLock and counts save requests so
/// tests can observe persistence traffic.
pub struct InMemorySettingsStore {
    settings: RwLock<FolderSettings>,
    save_requests: AtomicUsize,
}

impl InMemorySettingsStore {
    /// Create a new empty in-memory store
    pub fn new() -> Self {
        Self {
            settings: RwLock::new(FolderSettings::default()),
            save_requests: AtomicUsize::new(0),
        }
    }

    /// Create a store seeded with an existing settings root
    pub fn with_settings(mut settings: FolderSettings) -> Self {
        settings.normalize();
        Self {
            settings: RwLock::new(settings),
            save_requests: AtomicUsize::new(0),
        }
    }

    /// Number of times a save has been requested
    pub fn save_requests(&self) -> usize {
        self.save_requests.load(Ordering::SeqCst)
    }
}

impl Default for InMemorySettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore for InMemorySettingsStore {
    fn get_folder(&self, id: &FolderId) -> Result<Option<Folder>> {
        let settings = self.settings.read().unwrap();
        Ok(settings.folders.get(id).cloned())
    }

    fn insert_folder(&self, id: FolderId, folder: Folder) -> Result<()> {
        let mut settings = self.settings.write().unwrap();
        settings.folders.insert(id, folder);
        Ok(())
    }

    fn remove_folder(&self, id: &FolderId) -> Result<bool> {
        let mut settings = self.settings.write().unwrap();
        Ok(settings.folders.remove(id).is_some())
    }

    fn set_folder_name(&self, id: &FolderId, name: &str) -> Result<bool> {
        let mut settings = self.settings.write().unwrap();
        match settings.folders.get_mut(id) {
            Some(folder) => {
                folder.name = name.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn set_collapsed(&self, id: &FolderId, collapsed: bool) -> Result<bool> {
        let mut settings = self.settings.write().unwrap();
        match settings.folders.get_mut(id) {
            Some(folder) => {
                folder.collapsed = collapsed;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn folder_index(&self, character: &CharacterId) -> Result<Vec<FolderId>> {
        let settings = self.settings.read().unwrap();
        Ok(settings
            .character_folders
            .get(character)
            .cloned()
            .unwrap_or_default())
    }

    fn append_to_index(&self, character: &CharacterId, id: FolderId) -> Result<()> {
        let mut settings = self.settings.write().unwrap();
        settings
            .character_folders
            .entry(character.clone())
            .or_default()
            .push(id);
        Ok(())
    }

    fn remove_from_index(&self, character: &CharacterId, id: &FolderId) -> Result<bool> {
        let mut settings = self.settings.write().unwrap();
        match settings.character_folders.get_mut(character) {
            Some(ids) => {
                let before = ids.len();
                ids.retain(|existing| existing != id);
                Ok(ids.len() != before)
            }
            None => Ok(false),
        }
    }

    fn add_chat(&self, id: &FolderId, chat: &ChatId) -> Result<bool> {
        let mut settings = self.settings.write().unwrap();
        match settings.folders.get_mut(id) {
            Some(folder) => {
                if !folder.chats.contains(chat) {
                    folder.chats.push(chat.clone());
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn remove_chat_for_character(&self, character: &CharacterId, chat: &ChatId) -> Result<()> {
        let mut settings = self.settings.write().unwrap();
        let ids = settings
            .character_folders
            .get(character)
            .cloned()
            .unwrap_or_default();
        for id in ids {
            if let Some(folder) = settings.folders.get_mut(&id) {
                folder.chats.retain(|existing| existing != chat);
            }
        }
        Ok(())
    }

    fn snapshot(&self) -> Result<FolderSettings> {
        let settings = self.settings.read().unwrap();
        Ok(settings.clone())
    }

    fn replace(&self, settings: FolderSettings) -> Result<()> {
        let mut current = self.settings.write().unwrap();
        *current = settings;
        Ok(())
    }

    fn request_save(&self) {
        self.save_requests.fetch_add(1, Ordering::SeqCst);
    }
}
