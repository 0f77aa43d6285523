//! Mutation entry points for folder data

mod folders;

pub use folders::{FolderActions, MoveTarget};
