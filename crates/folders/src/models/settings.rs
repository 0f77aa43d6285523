//! Persisted settings root for folder assignments

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::{CharacterId, ChatId, Folder, FolderId};

/// Current settings schema version
pub const SETTINGS_VERSION: u32 = 2;

/// The aggregate persisted object: every folder record plus the per-character
/// folder orderings.
///
/// The storage layer owns how this gets to disk; the engine only mutates it
/// in memory and requests a debounced save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderSettings {
    /// Folder records by id
    #[serde(default)]
    pub folders: HashMap<FolderId, Folder>,
    /// Ordered folder ids per character. Every id must exist in `folders`;
    /// sequences for different characters are disjoint.
    #[serde(default)]
    pub character_folders: HashMap<CharacterId, Vec<FolderId>>,
    /// Schema version of this settings blob
    #[serde(default = "default_version")]
    pub version: u32,
}

fn default_version() -> u32 {
    SETTINGS_VERSION
}

impl Default for FolderSettings {
    fn default() -> Self {
        Self {
            folders: HashMap::new(),
            character_folders: HashMap::new(),
            version: SETTINGS_VERSION,
        }
    }
}

impl FolderSettings {
    /// Repair a freshly loaded settings blob.
    ///
    /// Run on every load before the engine sees the data:
    /// - folder names are trimmed
    /// - index entries pointing at missing folder records are dropped
    /// - a chat id appearing in more than one folder of the same character
    ///   keeps its first assignment in index order and loses the rest
    pub fn normalize(&mut self) {
        for folder in self.folders.values_mut() {
            folder.name = folder.name.trim().to_string();
        }

        for ids in self.character_folders.values_mut() {
            ids.retain(|id| self.folders.contains_key(id));
        }

        let index: Vec<(CharacterId, Vec<FolderId>)> = self
            .character_folders
            .iter()
            .map(|(c, ids)| (c.clone(), ids.clone()))
            .collect();
        for (_, ids) in index {
            let mut seen: HashSet<ChatId> = HashSet::new();
            for id in ids {
                if let Some(folder) = self.folders.get_mut(&id) {
                    folder.chats.retain(|chat| seen.insert(chat.clone()));
                }
            }
        }

        self.version = SETTINGS_VERSION;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty_at_current_version() {
        let settings = FolderSettings::default();
        assert!(settings.folders.is_empty());
        assert!(settings.character_folders.is_empty());
        assert_eq!(settings.version, SETTINGS_VERSION);
    }

    #[test]
    fn test_normalize_trims_names_and_drops_dangling_ids() {
        let mut settings = FolderSettings::default();
        let id = FolderId::new("f1");
        settings
            .folders
            .insert(id.clone(), Folder::new("  Arcs  ", 0));
        settings.character_folders.insert(
            CharacterId::new("c1"),
            vec![id.clone(), FolderId::new("gone")],
        );

        settings.normalize();

        assert_eq!(settings.folders[&id].name, "Arcs");
        assert_eq!(
            settings.character_folders[&CharacterId::new("c1")],
            vec![id]
        );
    }

    #[test]
    fn test_normalize_keeps_first_duplicate_assignment() {
        let mut settings = FolderSettings::default();
        let first = FolderId::new("f1");
        let second = FolderId::new("f2");

        let mut a = Folder::new("A", 0);
        a.chats.push(ChatId::new("x.jsonl"));
        let mut b = Folder::new("B", 1);
        b.chats.push(ChatId::new("x.jsonl"));
        b.chats.push(ChatId::new("y.jsonl"));

        settings.folders.insert(first.clone(), a);
        settings.folders.insert(second.clone(), b);
        settings
            .character_folders
            .insert(CharacterId::new("c1"), vec![first.clone(), second.clone()]);

        settings.normalize();

        assert!(settings.folders[&first].contains(&ChatId::new("x.jsonl")));
        assert!(!settings.folders[&second].contains(&ChatId::new("x.jsonl")));
        assert!(settings.folders[&second].contains(&ChatId::new("y.jsonl")));
    }

    #[test]
    fn test_settings_json_round_trip() {
        let mut settings = FolderSettings::default();
        let id = FolderId::generate();
        let mut folder = Folder::new("Arcs", 0);
        folder.chats.push(ChatId::new("a.jsonl"));
        settings.folders.insert(id.clone(), folder);
        settings
            .character_folders
            .insert(CharacterId::new("c1"), vec![id.clone()]);

        let json = serde_json::to_string(&settings).unwrap();
        let loaded: FolderSettings = serde_json::from_str(&json).unwrap();

        assert_eq!(loaded.version, SETTINGS_VERSION);
        assert!(loaded.folders[&id].contains(&ChatId::new("a.jsonl")));
    }
}
