//! JSON-file settings storage with debounced saves

use anyhow::Result;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use super::{InMemorySettingsStore, SettingsStore};
use crate::models::{CharacterId, ChatId, Folder, FolderId, FolderSettings};

/// Default delay between a save request and the actual disk write
pub const SAVE_DEBOUNCE: Duration = Duration::from_millis(500);

/// Settings filename in the Corral config directory
pub const SETTINGS_FILE: &str = "folders.json";

/// JSON-file-backed implementation of SettingsStore
///
/// Keeps the settings root in memory and flushes it to disk as pretty JSON.
/// `request_save` only arms a deadline; the embedder drives actual writes by
/// calling [`flush_if_due`](Self::flush_if_due) from its pump loop (or
/// [`flush`](Self::flush) on shutdown).
pub struct JsonSettingsStore {
    inner: InMemorySettingsStore,
    path: PathBuf,
    debounce: Duration,
    dirty_since: Mutex<Option<Instant>>,
}

impl JsonSettingsStore {
    /// Load settings from `path`, falling back to defaults when the file does
    /// not exist yet. A malformed file is also replaced with defaults rather
    /// than failing startup; the parse error is logged.
    pub fn load(path: impl Into<PathBuf>, debounce: Duration) -> Self {
        let path = path.into();
        let settings = match config::load_json_file::<FolderSettings>(&path) {
            Ok(mut loaded) => {
                loaded.normalize();
                loaded
            }
            Err(err) if path.exists() => {
                warn!("Could not parse {}, starting fresh: {err:#}", path.display());
                FolderSettings::default()
            }
            Err(_) => FolderSettings::default(),
        };

        Self {
            inner: InMemorySettingsStore::with_settings(settings),
            path,
            debounce,
            dirty_since: Mutex::new(None),
        }
    }

    /// Load from the standard location (~/.config/corral/folders.json)
    pub fn load_default() -> Result<Self> {
        let dir = config::ensure_config_dir()?;
        Ok(Self::load(dir.join(SETTINGS_FILE), SAVE_DEBOUNCE))
    }

    /// Path this store writes to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a save has been requested and not yet flushed
    pub fn pending_save(&self) -> bool {
        self.dirty_since.lock().unwrap().is_some()
    }

    /// Write to disk if the debounce window since the last save request has
    /// elapsed. Returns true when a write happened.
    pub fn flush_if_due(&self, now: Instant) -> Result<bool> {
        let due = {
            let dirty = self.dirty_since.lock().unwrap();
            matches!(*dirty, Some(since) if now.duration_since(since) >= self.debounce)
        };
        if !due {
            return Ok(false);
        }
        self.flush()?;
        Ok(true)
    }

    /// Write to disk immediately, clearing any pending save
    pub fn flush(&self) -> Result<()> {
        let snapshot = self.inner.snapshot()?;
        config::save_json_file(&self.path, &snapshot)?;
        *self.dirty_since.lock().unwrap() = None;
        debug!("Settings written to {}", self.path.display());
        Ok(())
    }
}

impl SettingsStore for JsonSettingsStore {
    fn get_folder(&self, id: &FolderId) -> Result<Option<Folder>> {
        self.inner.get_folder(id)
    }

    fn insert_folder(&self, id: FolderId, folder: Folder) -> Result<()> {
        self.inner.insert_folder(id, folder)
    }

    fn remove_folder(&self, id: &FolderId) -> Result<bool> {
        self.inner.remove_folder(id)
    }

    fn set_folder_name(&self, id: &FolderId, name: &str) -> Result<bool> {
        self.inner.set_folder_name(id, name)
    }

    fn set_collapsed(&self, id: &FolderId, collapsed: bool) -> Result<bool> {
        self.inner.set_collapsed(id, collapsed)
    }

    fn folder_index(&self, character: &CharacterId) -> Result<Vec<FolderId>> {
        self.inner.folder_index(character)
    }

    fn append_to_index(&self, character: &CharacterId, id: FolderId) -> Result<()> {
        self.inner.append_to_index(character, id)
    }

    fn remove_from_index(&self, character: &CharacterId, id: &FolderId) -> Result<bool> {
        self.inner.remove_from_index(character, id)
    }

    fn add_chat(&self, id: &FolderId, chat: &ChatId) -> Result<bool> {
        self.inner.add_chat(id, chat)
    }

    fn remove_chat_for_character(&self, character: &CharacterId, chat: &ChatId) -> Result<()> {
        self.inner.remove_chat_for_character(character, chat)
    }

    fn snapshot(&self) -> Result<FolderSettings> {
        self.inner.snapshot()
    }

    fn replace(&self, settings: FolderSettings) -> Result<()> {
        self.inner.replace(settings)
    }

    fn request_save(&self) {
        let mut dirty = self.dirty_since.lock().unwrap();
        // Keep the earliest request time so a stream of mutations cannot
        // starve the write forever
        if dirty.is_none() {
            *dirty = Some(Instant::now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonSettingsStore::load(dir.path().join("folders.json"), SAVE_DEBOUNCE);

        assert!(store.snapshot().unwrap().folders.is_empty());
        assert!(!store.pending_save());
    }

    #[test]
    fn test_flush_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("folders.json");

        let store = JsonSettingsStore::load(&path, SAVE_DEBOUNCE);
        let id = FolderId::new("f1");
        store.insert_folder(id.clone(), Folder::new("Arcs", 0)).unwrap();
        store
            .append_to_index(&CharacterId::new("c1"), id.clone())
            .unwrap();
        store.flush().unwrap();

        let reloaded = JsonSettingsStore::load(&path, SAVE_DEBOUNCE);
        assert_eq!(reloaded.get_folder(&id).unwrap().unwrap().name, "Arcs");
        assert_eq!(
            reloaded.folder_index(&CharacterId::new("c1")).unwrap(),
            vec![id]
        );
    }

    #[test]
    fn test_flush_if_due_waits_for_debounce() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("folders.json");
        let store = JsonSettingsStore::load(&path, Duration::from_secs(60));

        store.request_save();
        assert!(store.pending_save());

        // Inside the window: nothing written
        assert!(!store.flush_if_due(Instant::now()).unwrap());
        assert!(!path.exists());

        // Past the window: written and cleared
        let later = Instant::now() + Duration::from_secs(120);
        assert!(store.flush_if_due(later).unwrap());
        assert!(path.exists());
        assert!(!store.pending_save());
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("folders.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonSettingsStore::load(&path, SAVE_DEBOUNCE);
        assert!(store.snapshot().unwrap().folders.is_empty());
    }
}
