//! Reconciliation passes
//!
//! One pass reads the host state and rebuilds the proxy presentation from
//! scratch. The pass runs against a view the engine does not own, so every
//! step tolerates the host having moved underneath it: missing popup and
//! missing list are skips, not errors, and any failure leaves the engine
//! Idle for the next trigger to retry.

use anyhow::Result;
use log::{debug, error};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::host::HostView;
use crate::present::build_tree;
use crate::storage::SettingsStore;

/// Message mounted when the host has no active character
pub const NO_CHARACTER_PLACEHOLDER: &str = "Select a character to organize chats.";

/// How a reconciliation pass ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    /// The proxy tree was rebuilt and swapped in
    Rebuilt { sections: usize, items: usize },
    /// No character active; a neutral placeholder was mounted instead
    NoCharacter,
    /// Popup absent or hidden, nothing to do yet
    PopupHidden,
    /// Popup visible but its native list container is not there yet
    ListMissing,
    /// Another pass was already in progress; this one was dropped
    Busy,
    /// A step failed; the error was logged and the pass skipped
    Failed,
}

/// Rebuilds the proxy presentation from host and store state.
///
/// Two states, Idle and Building. A pass requested while Building is dropped
/// rather than queued: the reconciler's own writes can be observed by the
/// change detector, and dropping re-entrant triggers breaks that loop.
pub struct Reconciler {
    store: Arc<dyn SettingsStore>,
    host: Arc<dyn HostView>,
    building: AtomicBool,
}

/// Returns the reconciler to Idle on every exit path
struct BuildingGuard<'a>(&'a AtomicBool);

impl Drop for BuildingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl Reconciler {
    pub fn new(store: Arc<dyn SettingsStore>, host: Arc<dyn HostView>) -> Self {
        Self {
            store,
            host,
            building: AtomicBool::new(false),
        }
    }

    /// Whether a pass is currently in progress
    pub fn is_building(&self) -> bool {
        self.building.load(Ordering::SeqCst)
    }

    /// Run one reconciliation pass
    pub fn run_pass(&self) -> PassOutcome {
        if self.building.swap(true, Ordering::SeqCst) {
            debug!("Rebuild requested while building, dropped");
            return PassOutcome::Busy;
        }
        let _guard = BuildingGuard(&self.building);

        match self.build() {
            Ok(outcome) => outcome,
            Err(err) => {
                error!("Reconciliation pass failed: {err:#}");
                PassOutcome::Failed
            }
        }
    }

    fn build(&self) -> Result<PassOutcome> {
        if !self.host.popup_visible() {
            return Ok(PassOutcome::PopupHidden);
        }

        let Some(entries) = self.host.list_entries()? else {
            return Ok(PassOutcome::ListMissing);
        };

        let Some(character) = self.host.active_character() else {
            self.host.mount_placeholder(NO_CHARACTER_PLACEHOLDER)?;
            return Ok(PassOutcome::NoCharacter);
        };

        let tree = build_tree(self.store.as_ref(), &character, &entries)?;
        let sections = tree.sections.len();
        let items = tree.item_count();

        self.host.mount_proxy(tree)?;
        self.host.ensure_header_button()?;

        debug!(
            "Rebuilt proxy view for {}: {sections} sections, {items} items",
            character.as_str()
        );
        Ok(PassOutcome::Rebuilt { sections, items })
    }
}
