//! Interaction routing for proxy elements

mod menu;
mod router;

pub use menu::{MenuChoice, MenuEntry, MoveMenu, build_move_menu};
pub use router::{InteractionRouter, PendingAction};
