//! Phase state machine: menu, run, collection.
mod collection;
mod controller;
mod phase;
mod progress;

pub use collection::{CollectionPhaseController, CollectionTick};
pub use controller::GameFlowController;
pub use phase::{GameState, TransitionError};
pub use progress::ProgressFlags;
