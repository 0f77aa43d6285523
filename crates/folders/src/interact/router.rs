//! Interaction routing from proxy elements to host and store
//!
//! Primary activation on a proxy item is forwarded to the original host
//! element; the host stays the single source of truth for opening a chat.
//! Everything else a proxy element offers (collapse, move, rename, delete)
//! ends in a folder mutation.

use anyhow::Result;
use std::sync::Arc;

use super::menu::{MenuChoice, MoveMenu, build_move_menu};
use crate::actions::{FolderActions, MoveTarget};
use crate::models::{ChatId, EntryHandle, FolderId};
use crate::host::HostView;
use crate::storage::SettingsStore;

/// A destructive or name-changing mutation waiting for user confirmation.
///
/// The shell shows its modal from this token; dropping the token cancels,
/// [`InteractionRouter::confirm`] proceeds. The mutation itself only ever
/// runs on the affirmative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    Rename { folder: FolderId, current: String },
    Delete { folder: FolderId, name: String },
}

/// Routes proxy element interactions
pub struct InteractionRouter {
    store: Arc<dyn SettingsStore>,
    host: Arc<dyn HostView>,
    actions: FolderActions,
}

impl InteractionRouter {
    pub fn new(
        store: Arc<dyn SettingsStore>,
        host: Arc<dyn HostView>,
        actions: FolderActions,
    ) -> Self {
        Self {
            store,
            host,
            actions,
        }
    }

    /// Primary activation on a proxy item: forward to the original element
    pub fn activate_item(&self, handle: EntryHandle) -> Result<()> {
        self.host.activate_entry(handle)
    }

    /// Primary activation on a folder header: flip collapsed state.
    /// Returns the new state, or `None` for an unknown folder.
    pub fn toggle_folder(&self, id: &FolderId) -> Result<Option<bool>> {
        self.actions.toggle_collapsed(id)
    }

    /// Secondary activation on a proxy item: build the move menu
    pub fn open_move_menu(&self, chat: &ChatId) -> Result<MoveMenu> {
        let character = self.host.active_character();
        build_move_menu(self.store.as_ref(), chat, character.as_ref())
    }

    /// Apply a menu selection. Consumes the menu; the shell dismisses it
    /// afterwards regardless of the choice.
    pub fn choose(&self, menu: MoveMenu, choice: MenuChoice) -> Result<()> {
        let character = self.host.active_character();
        match choice {
            MenuChoice::Folder(id) => {
                self.actions
                    .move_chat(&menu.chat, MoveTarget::Folder(id), character.as_ref())
            }
            MenuChoice::Uncategorized => {
                self.actions
                    .move_chat(&menu.chat, MoveTarget::Uncategorized, character.as_ref())
            }
            MenuChoice::NewFolder { name } => {
                // Chain the move into the fresh folder in the same gesture
                if let Some(id) = self.actions.create_folder(&name, character.as_ref())? {
                    self.actions
                        .move_chat(&menu.chat, MoveTarget::Folder(id), character.as_ref())?;
                }
                Ok(())
            }
        }
    }

    /// "New folder" header control was activated with a name entered
    pub fn create_folder(&self, name: &str) -> Result<Option<FolderId>> {
        let character = self.host.active_character();
        self.actions.create_folder(name, character.as_ref())
    }

    /// Rename affordance on a folder header. Returns the confirmation token,
    /// or `None` for an unknown folder.
    pub fn request_rename(&self, id: &FolderId) -> Result<Option<PendingAction>> {
        Ok(self.store.get_folder(id)?.map(|folder| PendingAction::Rename {
            folder: id.clone(),
            current: folder.name,
        }))
    }

    /// Delete affordance on a folder header. Returns the confirmation token,
    /// or `None` for an unknown folder.
    pub fn request_delete(&self, id: &FolderId) -> Result<Option<PendingAction>> {
        Ok(self.store.get_folder(id)?.map(|folder| PendingAction::Delete {
            folder: id.clone(),
            name: folder.name,
        }))
    }

    /// Affirmative resolution of a pending action. `input` carries the new
    /// name for renames and is ignored for deletes. Returns whether the
    /// mutation went through.
    pub fn confirm(&self, action: PendingAction, input: Option<&str>) -> Result<bool> {
        match action {
            PendingAction::Rename { folder, .. } => match input {
                Some(name) => self.actions.rename_folder(&folder, name),
                None => Ok(false),
            },
            PendingAction::Delete { folder, .. } => {
                let character = self.host.active_character();
                self.actions.delete_folder(&folder, character.as_ref())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ElementGone, SimHostView};
    use crate::interact::MenuEntry;
    use crate::models::CharacterId;
    use crate::storage::InMemorySettingsStore;
    use crate::sync::RebuildSink;
    use std::time::Instant;

    struct NullSink;

    impl RebuildSink for NullSink {
        fn request_rebuild(&self, _now: Instant) {}
    }

    fn character() -> CharacterId {
        CharacterId::new("c1")
    }

    fn setup() -> (Arc<InMemorySettingsStore>, Arc<SimHostView>, InteractionRouter) {
        let store = Arc::new(InMemorySettingsStore::new());
        let host = Arc::new(SimHostView::new());
        host.show_popup();
        host.set_chats(&["a.jsonl", "b.jsonl"]);
        host.set_active_character(Some(character()));

        let actions = FolderActions::new(store.clone(), Arc::new(NullSink));
        let router = InteractionRouter::new(store.clone(), host.clone(), actions);
        (store, host, router)
    }

    #[test]
    fn test_primary_activation_forwards_to_host() {
        let (_, host, router) = setup();
        let entries = host.list_entries().unwrap().unwrap();

        router.activate_item(entries[0].handle).unwrap();

        assert_eq!(host.activations(), vec![ChatId::new("a.jsonl")]);
    }

    #[test]
    fn test_stale_handle_surfaces_element_gone() {
        let (_, host, router) = setup();
        let old = host.list_entries().unwrap().unwrap()[0].handle;
        host.set_chats(&["a.jsonl", "b.jsonl"]);

        let err = router.activate_item(old).unwrap_err();
        assert!(err.downcast_ref::<ElementGone>().is_some());
    }

    #[test]
    fn test_menu_selection_moves_chat() {
        let (store, _, router) = setup();
        let folder = router.create_folder("Arcs").unwrap().unwrap();

        let menu = router.open_move_menu(&ChatId::new("a.jsonl")).unwrap();
        assert!(menu.entries.contains(&MenuEntry::Folder {
            id: folder.clone(),
            name: "Arcs".to_string()
        }));

        router.choose(menu, MenuChoice::Folder(folder.clone())).unwrap();

        assert!(store
            .get_folder(&folder)
            .unwrap()
            .unwrap()
            .contains(&ChatId::new("a.jsonl")));
    }

    #[test]
    fn test_new_folder_choice_chains_the_move() {
        let (store, _, router) = setup();

        let menu = router.open_move_menu(&ChatId::new("a.jsonl")).unwrap();
        router
            .choose(
                menu,
                MenuChoice::NewFolder {
                    name: "Fresh".to_string(),
                },
            )
            .unwrap();

        let snapshot = store.snapshot().unwrap();
        let (_, folder) = snapshot
            .folders
            .iter()
            .find(|(_, f)| f.name == "Fresh")
            .expect("folder created from menu");
        assert!(folder.contains(&ChatId::new("a.jsonl")));
    }

    #[test]
    fn test_new_folder_choice_with_empty_name_changes_nothing() {
        let (store, _, router) = setup();

        let menu = router.open_move_menu(&ChatId::new("a.jsonl")).unwrap();
        router
            .choose(menu, MenuChoice::NewFolder { name: "  ".to_string() })
            .unwrap();

        assert!(store.snapshot().unwrap().folders.is_empty());
    }

    #[test]
    fn test_rename_only_proceeds_on_confirm() {
        let (store, _, router) = setup();
        let folder = router.create_folder("Arcs").unwrap().unwrap();

        let pending = router.request_rename(&folder).unwrap().unwrap();
        assert_eq!(
            pending,
            PendingAction::Rename {
                folder: folder.clone(),
                current: "Arcs".to_string()
            }
        );

        // Dropping the token cancels; nothing changed
        drop(router.request_rename(&folder).unwrap());
        assert_eq!(store.get_folder(&folder).unwrap().unwrap().name, "Arcs");

        assert!(router.confirm(pending, Some("Story Arcs")).unwrap());
        assert_eq!(
            store.get_folder(&folder).unwrap().unwrap().name,
            "Story Arcs"
        );
    }

    #[test]
    fn test_delete_only_proceeds_on_confirm() {
        let (store, _, router) = setup();
        let folder = router.create_folder("Arcs").unwrap().unwrap();

        let pending = router.request_delete(&folder).unwrap().unwrap();
        assert!(store.get_folder(&folder).unwrap().is_some());

        assert!(router.confirm(pending, None).unwrap());
        assert!(store.get_folder(&folder).unwrap().is_none());
    }

    #[test]
    fn test_toggle_folder_round_trip() {
        let (store, _, router) = setup();
        let folder = router.create_folder("Arcs").unwrap().unwrap();

        assert_eq!(router.toggle_folder(&folder).unwrap(), Some(true));
        assert!(store.get_folder(&folder).unwrap().unwrap().collapsed);
        assert_eq!(router.toggle_folder(&folder).unwrap(), Some(false));
    }
}
