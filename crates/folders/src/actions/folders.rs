//! Folder mutation handlers
//!
//! Every mutation goes through here: validate, update the store, request a
//! debounced save, request a rebuild. Precondition failures (no active
//! character, empty or unknown identifiers) are silent no-ops signalled
//! through the return value; the store is never left half-updated, since a
//! rebuild may run synchronously after any of these calls.

use anyhow::Result;
use log::{debug, info};
use std::sync::Arc;
use std::time::Instant;

use crate::models::{CharacterId, ChatId, Folder, FolderId};
use crate::storage::SettingsStore;
use crate::sync::RebuildSink;

/// Destination of a chat move
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveTarget {
    Folder(FolderId),
    Uncategorized,
}

/// Handler for folder mutations
pub struct FolderActions {
    store: Arc<dyn SettingsStore>,
    rebuild: Arc<dyn RebuildSink>,
}

impl FolderActions {
    pub fn new(store: Arc<dyn SettingsStore>, rebuild: Arc<dyn RebuildSink>) -> Self {
        Self { store, rebuild }
    }

    fn commit(&self) {
        self.store.request_save();
        self.rebuild.request_rebuild(Instant::now());
    }

    /// Create a folder for the active character.
    ///
    /// Returns the new folder id, or `None` when the trimmed name is empty
    /// or no character is active. The id is returned synchronously so the
    /// move menu can chain a move into the fresh folder.
    pub fn create_folder(
        &self,
        name: &str,
        active: Option<&CharacterId>,
    ) -> Result<Option<FolderId>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }
        let Some(character) = active else {
            debug!("Folder \"{name}\" not created: no active character");
            return Ok(None);
        };

        let id = FolderId::generate();
        let order = self.store.folder_index(character)?.len() as u32;
        self.store.insert_folder(id.clone(), Folder::new(name, order))?;
        self.store.append_to_index(character, id.clone())?;
        self.commit();

        info!("Created folder \"{name}\" for {}", character.as_str());
        Ok(Some(id))
    }

    /// Rename a folder. No-op (false) on an empty name or unknown id.
    pub fn rename_folder(&self, id: &FolderId, name: &str) -> Result<bool> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(false);
        }
        if !self.store.set_folder_name(id, name)? {
            return Ok(false);
        }
        self.commit();
        Ok(true)
    }

    /// Delete a folder: drop it from the active character's ordering and
    /// remove the record. Chats assigned to it resolve as uncategorized from
    /// the next pass on; no migration is needed.
    pub fn delete_folder(&self, id: &FolderId, active: Option<&CharacterId>) -> Result<bool> {
        let Some(character) = active else {
            return Ok(false);
        };

        self.store.remove_from_index(character, id)?;
        let removed = self.store.remove_folder(id)?;
        self.commit();

        if removed {
            info!("Deleted folder {}", id.as_str());
        }
        Ok(removed)
    }

    /// Move a chat into a folder, or out of all folders.
    ///
    /// The chat is first removed from every folder of the active character,
    /// which is what keeps an id in at most one folder; it is then appended
    /// to the target when the target names a real folder. Idempotent:
    /// repeating the call yields the same final state.
    pub fn move_chat(
        &self,
        chat: &ChatId,
        target: MoveTarget,
        active: Option<&CharacterId>,
    ) -> Result<()> {
        let Some(character) = active else {
            return Ok(());
        };

        self.store.remove_chat_for_character(character, chat)?;
        if let MoveTarget::Folder(id) = &target {
            // An unknown target leaves the chat uncategorized
            self.store.add_chat(id, chat)?;
        }
        self.commit();
        Ok(())
    }

    /// Flip a folder's collapsed flag. Returns the new state, or `None` on
    /// an unknown id.
    pub fn toggle_collapsed(&self, id: &FolderId) -> Result<Option<bool>> {
        let Some(folder) = self.store.get_folder(id)? else {
            return Ok(None);
        };
        let collapsed = !folder.collapsed;
        self.store.set_collapsed(id, collapsed)?;
        self.commit();
        Ok(Some(collapsed))
    }
}
