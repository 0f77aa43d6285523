//! Folders crate - Business logic for the chat folder overlay
//!
//! This crate provides host-independent folder organization including:
//! - Domain models (Folder, FolderSettings, ChatEntry)
//! - Settings storage trait abstractions (in-memory and JSON-file backed)
//! - Folder mutation handlers (create, rename, delete, move, collapse)
//! - Assignment queries for presentation consumption
//! - The sync engine: mutation classification, debounced rebuild scheduling,
//!   heartbeat fallback, and guarded reconciliation passes
//! - Pure proxy tree construction and interaction routing back to the host
//!
//! The host owns the canonical chat list and its rendering; this crate has
//! zero UI dependencies and talks to the host only through the [`host`]
//! traits.

pub mod actions;
pub mod host;
pub mod interact;
pub mod models;
pub mod present;
pub mod query;
pub mod storage;
pub mod sync;

pub use actions::{FolderActions, MoveTarget};
pub use host::{ElementGone, HostSelectors, HostView, MutationEvent, MutationKind, SimHostView};
pub use interact::{InteractionRouter, MenuChoice, MenuEntry, MoveMenu, PendingAction};
pub use models::{
    CharacterId, ChatEntry, ChatId, EntryHandle, Folder, FolderId, FolderSettings,
    SETTINGS_VERSION,
};
pub use present::{ProxyItem, ProxyTree, Section, SectionKind, build_tree};
pub use query::{Assignment, folders_for_character, resolve_assignment};
pub use storage::{InMemorySettingsStore, JsonSettingsStore, SettingsStore};
pub use sync::{
    // Engine surface
    NO_CHARACTER_PLACEHOLDER, Overlay, PassOutcome, RebuildSink, Reconciler,
    // Timing (for embedder pump loops)
    DEBOUNCE_WINDOW, Debounce, HEARTBEAT_INTERVAL, heartbeat_due,
    // Classification
    is_relevant,
};
