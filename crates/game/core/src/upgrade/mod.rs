//! Upgrade progression: a static DAG plus the player's overlay on it.
mod graph;
mod tracker;

pub use graph::{GraphError, NodeId, UpgradeGraphConfig, UpgradeNode};
pub use tracker::{PurchaseError, UpgradeEntry, UpgradeTracker};
