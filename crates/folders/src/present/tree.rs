//! Proxy tree construction
//!
//! Pure construction of folder sections, counts, and proxy items from
//! folder/assignment data. Nothing here touches the host view; the reconciler
//! hands the finished tree to the host for an atomic swap.

use anyhow::Result;
use std::collections::HashMap;

use crate::models::{CharacterId, ChatEntry, ChatId, EntryHandle, FolderId};
use crate::query::{Assignment, folders_for_character, resolve_assignment};
use crate::storage::SettingsStore;

/// What a section stands for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionKind {
    /// A real, persisted folder
    Folder(FolderId),
    /// The virtual trailing section for unassigned chats
    Uncategorized,
}

/// Visual stand-in for one host chat item.
///
/// Interactions on a proxy item are forwarded to the original host element
/// through its entry handle.
#[derive(Debug, Clone)]
pub struct ProxyItem {
    pub chat: ChatId,
    /// Cloned rendering fragment of the native block
    pub preview: String,
    /// Original element to forward activation to, valid this pass only
    pub handle: EntryHandle,
}

/// One folder section of the proxy tree
#[derive(Debug, Clone)]
pub struct Section {
    pub kind: SectionKind,
    pub title: String,
    /// Collapsed sections keep their items; only the content region is
    /// rendered non-visible, so expanding needs no rebuild
    pub collapsed: bool,
    /// Entirely omitted from display (empty uncategorized section)
    pub hidden: bool,
    /// Displayed count, computed from the items actually placed
    pub count: usize,
    pub items: Vec<ProxyItem>,
}

impl Section {
    pub fn folder_id(&self) -> Option<&FolderId> {
        match &self.kind {
            SectionKind::Folder(id) => Some(id),
            SectionKind::Uncategorized => None,
        }
    }
}

/// The full replacement presentation for one reconciliation pass
#[derive(Debug, Clone, Default)]
pub struct ProxyTree {
    pub sections: Vec<Section>,
}

impl ProxyTree {
    /// Total number of proxy items across all sections
    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }

    /// Sections that should actually be displayed
    pub fn visible_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|s| !s.hidden)
    }

    pub fn section(&self, kind: &SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| &s.kind == kind)
    }
}

/// Build the full replacement tree for the active character.
///
/// One section per folder in stored order, then a trailing uncategorized
/// section hidden when empty. Each snapshot entry is resolved against the
/// store and placed into its section in snapshot order; counts come from the
/// placed items, so assignments referencing chats the host no longer has
/// simply do not inflate the numbers.
pub fn build_tree(
    store: &dyn SettingsStore,
    character: &CharacterId,
    entries: &[ChatEntry],
) -> Result<ProxyTree> {
    let mut sections = Vec::new();
    let mut slot_by_folder: HashMap<FolderId, usize> = HashMap::new();

    for (id, folder) in folders_for_character(store, character)? {
        slot_by_folder.insert(id.clone(), sections.len());
        sections.push(Section {
            kind: SectionKind::Folder(id),
            title: folder.name.clone(),
            collapsed: folder.collapsed,
            hidden: false,
            count: 0,
            items: Vec::new(),
        });
    }

    let uncategorized_slot = sections.len();
    sections.push(Section {
        kind: SectionKind::Uncategorized,
        title: "Uncategorized".to_string(),
        collapsed: false,
        hidden: false,
        count: 0,
        items: Vec::new(),
    });

    for entry in entries {
        if entry.id.as_str().is_empty() {
            continue;
        }
        let slot = match resolve_assignment(store, &entry.id, Some(character))? {
            Assignment::Folder(id) => slot_by_folder
                .get(&id)
                .copied()
                .unwrap_or(uncategorized_slot),
            Assignment::Uncategorized => uncategorized_slot,
        };
        sections[slot].items.push(ProxyItem {
            chat: entry.id.clone(),
            preview: entry.preview.clone(),
            handle: entry.handle,
        });
    }

    for section in &mut sections {
        section.count = section.items.len();
        if section.kind == SectionKind::Uncategorized {
            section.hidden = section.items.is_empty();
        }
    }

    Ok(ProxyTree { sections })
}
