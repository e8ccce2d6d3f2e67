//! Mutable simulation state owned by individual components.
//!
//! - [`DefenseWord`]: a typed target with progress and hit points
//! - [`RunManager`]: hit points, level and shield for the current run
//! - [`EnergyTracker`]: the draining resource that ends active play
//! - [`LetterTracker`]: letters and coins, persisted across runs
mod energy;
mod letters;
mod run;
mod word;

pub use energy::{EnergyTick, EnergyTracker};
pub use letters::{LetterKind, LetterTracker};
pub use run::{DamageOutcome, RunManager};
pub use word::{DefenseWord, WordId, WordKind};
