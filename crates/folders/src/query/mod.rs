//! Read-side queries over the settings store

mod assign;

pub use assign::{Assignment, folders_for_character, resolve_assignment};
