//! Host view trait definitions
//!
//! The host owns the canonical chat list and its rendering; this trait is the
//! narrow seam the engine reads through and writes its proxy presentation
//! through. Nothing behind it is ever cached across reconciliation passes.

use anyhow::Result;

use crate::models::{CharacterId, ChatEntry, EntryHandle};
use crate::present::ProxyTree;

/// Activation was forwarded to an element the host has since recreated
#[derive(Debug, thiserror::Error)]
#[error("Host element no longer exists")]
pub struct ElementGone;

/// Stable identifiers by which the host popup and its native list container
/// are located
#[derive(Debug, Clone)]
pub struct HostSelectors {
    /// Element id of the chat selection popup
    pub popup_id: String,
    /// Class of the native item-list container inside the popup
    pub list_class: String,
}

impl Default for HostSelectors {
    fn default() -> Self {
        Self {
            popup_id: "select_chat_popup".to_string(),
            list_class: "select_chat_block_wrapper".to_string(),
        }
    }
}

/// What changed in an observed structural/attribute mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationKind {
    /// Children were added or removed under the target
    ChildList,
    /// An attribute of the target changed (visibility, identity)
    Attribute { name: String },
}

/// One passive observation record, forwarded by the embedder from wherever
/// the host view might mount
#[derive(Debug, Clone)]
pub struct MutationEvent {
    pub target_id: Option<String>,
    pub target_classes: Vec<String>,
    pub kind: MutationKind,
}

impl MutationEvent {
    pub fn child_list(target_id: Option<&str>, classes: &[&str]) -> Self {
        Self {
            target_id: target_id.map(str::to_string),
            target_classes: classes.iter().map(|c| c.to_string()).collect(),
            kind: MutationKind::ChildList,
        }
    }

    pub fn attribute(target_id: Option<&str>, classes: &[&str], name: &str) -> Self {
        Self {
            target_id: target_id.map(str::to_string),
            target_classes: classes.iter().map(|c| c.to_string()).collect(),
            kind: MutationKind::Attribute {
                name: name.to_string(),
            },
        }
    }
}

/// Trait over the host popup and its event-bus context
///
/// Reads are passive: the engine snapshots the native list each pass and
/// never mutates it. The only writes go to the proxy mount point and the
/// popup header, both owned by the overlay.
pub trait HostView: Send + Sync {
    /// Whether the chat selection popup exists and is currently displayed
    fn popup_visible(&self) -> bool;

    /// Snapshot the native list items.
    ///
    /// Returns `None` when the native container is absent (popup mid-render),
    /// which the reconciler treats as "nothing to do yet".
    fn list_entries(&self) -> Result<Option<Vec<ChatEntry>>>;

    /// The character the host currently has active, if any
    fn active_character(&self) -> Option<CharacterId>;

    /// Whether the proxy presentation is currently mounted in the popup
    fn proxy_mounted(&self) -> bool;

    /// Atomically replace the proxy presentation: the mount point is emptied
    /// and repopulated in one step, never patched piecemeal
    fn mount_proxy(&self, tree: ProxyTree) -> Result<()>;

    /// Replace the proxy presentation with a neutral placeholder message
    fn mount_placeholder(&self, message: &str) -> Result<()>;

    /// Add the "new folder" control to the popup header if it is not already
    /// there. Must be idempotent.
    fn ensure_header_button(&self) -> Result<()>;

    /// Forward a primary activation to the original host element.
    ///
    /// Fails with [`ElementGone`] when the handle no longer resolves, i.e.
    /// the host recreated its elements since the snapshot was taken.
    fn activate_entry(&self, handle: EntryHandle) -> Result<()>;
}
