//! Aggregation loop and its control surface

mod control;
mod update_manager;

pub use control::{spawn_signal_handlers, LoopControl};
pub use update_manager::UpdateManager;
