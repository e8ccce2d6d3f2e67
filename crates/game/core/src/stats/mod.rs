//! Derived player stats.
mod player;

pub use player::{PlayerStats, UpgradeId};
