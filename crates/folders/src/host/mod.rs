//! Host view abstraction and simulated implementation
//!
//! The engine never owns the chat list; these types are the seam through
//! which it observes the host and mounts its proxy presentation.

mod sim;
mod traits;

pub use sim::SimHostView;
pub use traits::{ElementGone, HostSelectors, HostView, MutationEvent, MutationKind};
