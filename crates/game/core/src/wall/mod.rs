//! Concentric breakable wall around the arena.
mod manager;
mod segment;
mod tracker;

pub use manager::WallManager;
pub use segment::{ArenaBounds, SIDES_PER_RING, SideOrigin, WallSegmentId};
pub use tracker::{BreakOutcome, WallTracker};
