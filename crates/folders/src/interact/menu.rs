//! Move menu model
//!
//! The transient menu opened by secondary activation on a proxy item. This
//! is pure data; the shell renders it and reports the selection back through
//! the router, which consumes the menu (a menu never outlives one choice).

use anyhow::Result;

use crate::models::{CharacterId, ChatId, FolderId};
use crate::query::folders_for_character;
use crate::storage::SettingsStore;

/// One row of the move menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Folder { id: FolderId, name: String },
    Uncategorized,
    NewFolder,
}

/// The user's selection from the menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    Folder(FolderId),
    Uncategorized,
    NewFolder { name: String },
}

/// A move menu opened for one chat
#[derive(Debug, Clone)]
pub struct MoveMenu {
    pub chat: ChatId,
    pub entries: Vec<MenuEntry>,
}

/// Build the menu for a chat: the active character's folders in stored
/// order, then Uncategorized, then New Folder.
pub fn build_move_menu(
    store: &dyn SettingsStore,
    chat: &ChatId,
    character: Option<&CharacterId>,
) -> Result<MoveMenu> {
    let mut entries = Vec::new();

    if let Some(character) = character {
        for (id, folder) in folders_for_character(store, character)? {
            entries.push(MenuEntry::Folder {
                id,
                name: folder.name,
            });
        }
    }

    entries.push(MenuEntry::Uncategorized);
    entries.push(MenuEntry::NewFolder);

    Ok(MoveMenu {
        chat: chat.clone(),
        entries,
    })
}
