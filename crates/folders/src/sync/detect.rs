//! Passive mutation classification
//!
//! The embedder forwards structural and attribute mutations from wherever
//! the host view might mount; this module decides which of them warrant a
//! rebuild. Writes the overlay makes to its own proxy subtree never match
//! these rules, which is the first line of defense against the engine
//! re-triggering itself.

use crate::host::{HostSelectors, MutationEvent, MutationKind};

/// Attribute names that can change the popup's visibility or identity
pub const OBSERVED_ATTRIBUTES: [&str; 2] = ["style", "class"];

/// Whether an observed mutation warrants a rebuild.
///
/// Relevant mutations are those touching the host's native item-list
/// container (any kind) or the popup element itself (child changes, or one
/// of the visibility attributes).
pub fn is_relevant(event: &MutationEvent, selectors: &HostSelectors) -> bool {
    if event
        .target_classes
        .iter()
        .any(|class| class == &selectors.list_class)
    {
        return true;
    }

    if event.target_id.as_deref() == Some(selectors.popup_id.as_str()) {
        return match &event.kind {
            MutationKind::ChildList => true,
            MutationKind::Attribute { name } => OBSERVED_ATTRIBUTES.contains(&name.as_str()),
        };
    }

    false
}
