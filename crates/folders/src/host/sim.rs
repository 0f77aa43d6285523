//! Simulated host view
//!
//! An in-memory stand-in for the real host popup, used by tests and the
//! driver app. Mimics the behaviors the engine must survive: the popup
//! appearing and hiding, the native list being replaced wholesale, and
//! element references going stale between passes.

use anyhow::Result;
use std::sync::Mutex;

use super::{ElementGone, HostView};
use crate::models::{CharacterId, ChatEntry, ChatId, EntryHandle};
use crate::present::ProxyTree;

#[derive(Debug, Clone)]
enum Mounted {
    Tree(ProxyTree),
    Placeholder(String),
}

#[derive(Default)]
struct SimState {
    popup_visible: bool,
    list_present: bool,
    entries: Vec<ChatEntry>,
    next_handle: u64,
    active_character: Option<CharacterId>,
    mounted: Option<Mounted>,
    header_button: bool,
    header_injections: usize,
    activations: Vec<ChatId>,
}

/// In-memory implementation of HostView
pub struct SimHostView {
    state: Mutex<SimState>,
}

impl SimHostView {
    /// Create a simulated host with a hidden popup and no items
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SimState::default()),
        }
    }

    /// Show the popup with its native list container present
    pub fn show_popup(&self) {
        let mut state = self.state.lock().unwrap();
        state.popup_visible = true;
        state.list_present = true;
    }

    /// Hide the popup (its contents, including any mounted proxy, go away)
    pub fn hide_popup(&self) {
        let mut state = self.state.lock().unwrap();
        state.popup_visible = false;
        state.mounted = None;
        state.header_button = false;
    }

    /// Toggle whether the native list container exists inside the popup
    pub fn set_list_present(&self, present: bool) {
        self.state.lock().unwrap().list_present = present;
    }

    /// Replace the native list wholesale. Every entry gets a fresh element
    /// handle, invalidating handles captured in earlier snapshots.
    pub fn set_chats(&self, chats: &[&str]) {
        let mut state = self.state.lock().unwrap();
        let mut entries = Vec::with_capacity(chats.len());
        for name in chats {
            state.next_handle += 1;
            let handle = EntryHandle(state.next_handle);
            entries.push(ChatEntry::new(*name, format!("<block>{name}</block>"), handle));
        }
        state.entries = entries;
    }

    pub fn set_active_character(&self, character: Option<CharacterId>) {
        self.state.lock().unwrap().active_character = character;
    }

    /// Wipe the mounted proxy without touching the native list, simulating a
    /// host update the observer failed to classify
    pub fn clear_proxy(&self) {
        self.state.lock().unwrap().mounted = None;
    }

    /// The currently mounted proxy tree, if a tree (not a placeholder) is up
    pub fn mounted_tree(&self) -> Option<ProxyTree> {
        match &self.state.lock().unwrap().mounted {
            Some(Mounted::Tree(tree)) => Some(tree.clone()),
            _ => None,
        }
    }

    /// The currently mounted placeholder message, if any
    pub fn placeholder(&self) -> Option<String> {
        match &self.state.lock().unwrap().mounted {
            Some(Mounted::Placeholder(message)) => Some(message.clone()),
            _ => None,
        }
    }

    /// Chats whose original elements received a forwarded activation
    pub fn activations(&self) -> Vec<ChatId> {
        self.state.lock().unwrap().activations.clone()
    }

    /// How many times the header button was actually injected
    pub fn header_injections(&self) -> usize {
        self.state.lock().unwrap().header_injections
    }
}

impl Default for SimHostView {
    fn default() -> Self {
        Self::new()
    }
}

impl HostView for SimHostView {
    fn popup_visible(&self) -> bool {
        self.state.lock().unwrap().popup_visible
    }

    fn list_entries(&self) -> Result<Option<Vec<ChatEntry>>> {
        let state = self.state.lock().unwrap();
        if !state.list_present {
            return Ok(None);
        }
        Ok(Some(state.entries.clone()))
    }

    fn active_character(&self) -> Option<CharacterId> {
        self.state.lock().unwrap().active_character.clone()
    }

    fn proxy_mounted(&self) -> bool {
        self.state.lock().unwrap().mounted.is_some()
    }

    fn mount_proxy(&self, tree: ProxyTree) -> Result<()> {
        self.state.lock().unwrap().mounted = Some(Mounted::Tree(tree));
        Ok(())
    }

    fn mount_placeholder(&self, message: &str) -> Result<()> {
        self.state.lock().unwrap().mounted = Some(Mounted::Placeholder(message.to_string()));
        Ok(())
    }

    fn ensure_header_button(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !state.header_button {
            state.header_button = true;
            state.header_injections += 1;
        }
        Ok(())
    }

    fn activate_entry(&self, handle: EntryHandle) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let chat = state
            .entries
            .iter()
            .find(|entry| entry.handle == handle)
            .map(|entry| entry.id.clone())
            .ok_or(ElementGone)?;
        state.activations.push(chat);
        Ok(())
    }
}
