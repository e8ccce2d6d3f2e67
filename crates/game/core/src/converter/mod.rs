//! Menu-side minigame that turns collected letters into coins.
mod geometry;
mod manager;

pub use geometry::Vec2;
pub use manager::{BlackHole, ConverterInput, ConverterManager, LooseLetter};
