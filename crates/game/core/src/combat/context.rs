use crate::env::{RandomSource, WordSource};
use crate::events::EventQueue;
use crate::state::{EnergyTracker, LetterTracker, RunManager};
use crate::stats::PlayerStats;

/// Everything word resolution touches outside the word list itself.
///
/// Built by the flow controller for the duration of one call and handed to
/// [`super::WordManager`] and [`crate::wall::WallManager`].
pub struct CombatContext<'a> {
    /// Derived stats; read-only during play.
    pub stats: &'a PlayerStats,

    pub run: &'a mut RunManager,

    pub energy: &'a mut EnergyTracker,

    /// Letter and coin inventory credited on kills.
    pub letters: &'a mut LetterTracker,

    pub rng: &'a mut dyn RandomSource,

    /// Supplies replacement and newly spawned word text.
    pub words: &'a dyn WordSource,

    pub events: &'a mut EventQueue,
}

impl<'a> CombatContext<'a> {
    pub fn new(
        stats: &'a PlayerStats,
        run: &'a mut RunManager,
        energy: &'a mut EnergyTracker,
        letters: &'a mut LetterTracker,
        rng: &'a mut dyn RandomSource,
        words: &'a dyn WordSource,
        events: &'a mut EventQueue,
    ) -> Self {
        Self {
            stats,
            run,
            energy,
            letters,
            rng,
            words,
            events,
        }
    }
}
