//! Word combat: spawning, keystroke matching, damage and kill resolution.
//!
//! [`WordManager`] owns the live word list. Everything else it touches
//! (run hp, energy, inventory, randomness) arrives through a
//! [`CombatContext`] so the manager stays free of back-references.

mod context;
mod words;

pub use context::CombatContext;
pub use words::WordManager;
