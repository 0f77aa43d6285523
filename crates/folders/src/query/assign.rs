//! Assignment resolution queries

use anyhow::Result;

use crate::models::{CharacterId, ChatId, Folder, FolderId};
use crate::storage::SettingsStore;

/// Where a chat belongs for the active character
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    /// The first folder in the character's ordering whose item set contains
    /// the chat
    Folder(FolderId),
    /// Not present in any folder, or no character is active
    Uncategorized,
}

impl Assignment {
    pub fn is_uncategorized(&self) -> bool {
        matches!(self, Assignment::Uncategorized)
    }
}

/// Resolve the owning folder for a chat.
///
/// Scans the active character's folder ordering in order and returns the
/// first folder containing the chat. A pure function of current store state;
/// results are never cached across reconciliation passes, since folder
/// contents can change between passes.
pub fn resolve_assignment(
    store: &dyn SettingsStore,
    chat: &ChatId,
    character: Option<&CharacterId>,
) -> Result<Assignment> {
    let Some(character) = character else {
        return Ok(Assignment::Uncategorized);
    };

    for id in store.folder_index(character)? {
        if let Some(folder) = store.get_folder(&id)? {
            if folder.contains(chat) {
                return Ok(Assignment::Folder(id));
            }
        }
    }

    Ok(Assignment::Uncategorized)
}

/// List a character's folders in stored order.
///
/// Index entries pointing at missing folder records are skipped.
pub fn folders_for_character(
    store: &dyn SettingsStore,
    character: &CharacterId,
) -> Result<Vec<(FolderId, Folder)>> {
    let mut result = Vec::new();
    for id in store.folder_index(character)? {
        if let Some(folder) = store.get_folder(&id)? {
            result.push((id, folder));
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Folder;
    use crate::storage::InMemorySettingsStore;

    fn character() -> CharacterId {
        CharacterId::new("c1")
    }

    fn setup_store() -> (InMemorySettingsStore, FolderId, FolderId) {
        let store = InMemorySettingsStore::new();
        let first = FolderId::new("f1");
        let second = FolderId::new("f2");

        store.insert_folder(first.clone(), Folder::new("Arcs", 0)).unwrap();
        store.insert_folder(second.clone(), Folder::new("Side", 1)).unwrap();
        store.append_to_index(&character(), first.clone()).unwrap();
        store.append_to_index(&character(), second.clone()).unwrap();

        (store, first, second)
    }

    #[test]
    fn test_resolve_unassigned_chat() {
        let (store, _, _) = setup_store();
        let assignment =
            resolve_assignment(&store, &ChatId::new("a.jsonl"), Some(&character())).unwrap();
        assert_eq!(assignment, Assignment::Uncategorized);
    }

    #[test]
    fn test_resolve_assigned_chat() {
        let (store, first, _) = setup_store();
        store.add_chat(&first, &ChatId::new("a.jsonl")).unwrap();

        let assignment =
            resolve_assignment(&store, &ChatId::new("a.jsonl"), Some(&character())).unwrap();
        assert_eq!(assignment, Assignment::Folder(first));
    }

    #[test]
    fn test_resolve_without_character() {
        let (store, first, _) = setup_store();
        store.add_chat(&first, &ChatId::new("a.jsonl")).unwrap();

        let assignment = resolve_assignment(&store, &ChatId::new("a.jsonl"), None).unwrap();
        assert_eq!(assignment, Assignment::Uncategorized);
    }

    #[test]
    fn test_first_folder_in_order_wins() {
        let (store, first, second) = setup_store();
        // Both folders claim the chat; the ordering decides
        store.add_chat(&first, &ChatId::new("a.jsonl")).unwrap();
        store.add_chat(&second, &ChatId::new("a.jsonl")).unwrap();

        let assignment =
            resolve_assignment(&store, &ChatId::new("a.jsonl"), Some(&character())).unwrap();
        assert_eq!(assignment, Assignment::Folder(first));
    }

    #[test]
    fn test_folders_for_character_skips_dangling_ids() {
        let (store, first, second) = setup_store();
        store.remove_folder(&second).unwrap();

        let folders = folders_for_character(&store, &character()).unwrap();
        let ids: Vec<FolderId> = folders.into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![first]);
    }

    #[test]
    fn test_resolve_after_folder_deleted() {
        let (store, first, _) = setup_store();
        store.add_chat(&first, &ChatId::new("a.jsonl")).unwrap();
        store.remove_from_index(&character(), &first).unwrap();
        store.remove_folder(&first).unwrap();

        let assignment =
            resolve_assignment(&store, &ChatId::new("a.jsonl"), Some(&character())).unwrap();
        assert_eq!(assignment, Assignment::Uncategorized);
    }
}
