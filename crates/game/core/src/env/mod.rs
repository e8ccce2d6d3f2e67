//! External collaborators consumed by the simulation.
//!
//! The core never reads a clock or a keyboard. Randomness and word text come
//! in through the traits below so tests can script them and hosts can seed
//! them.
mod rng;
mod words;

pub use rng::{PcgRng, RandomSource};
pub use words::{WordList, WordSource};
