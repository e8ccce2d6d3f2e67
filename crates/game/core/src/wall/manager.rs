//! Wall words, wall typing and blue word spawning.

use super::segment::WallSegmentId;
use super::tracker::WallTracker;
use crate::combat::{CombatContext, WordManager};
use crate::config::WallConfig;
use crate::env::{RandomSource, WordSource};
use crate::events::{EventQueue, GameEvent};
use crate::flow::GameState;
use crate::state::{DefenseWord, WordId};
use crate::stats::PlayerStats;
use crate::timer::RepeatTimer;

/// Drives the wall during a run.
///
/// Each unbroken segment carries one word. Typing it through breaks the
/// segment. Rings only accept input once revealed by upgrades.
#[derive(Clone, Debug)]
pub struct WallManager {
    config: WallConfig,
    tracker: WallTracker,
    /// Indexed by flat segment index; `None` once broken.
    words: Vec<Option<DefenseWord>>,
    blue_timer: RepeatTimer,
    auto_type_timer: RepeatTimer,
}

impl WallManager {
    pub fn new(config: WallConfig) -> Self {
        let tracker = WallTracker::new(config.rings.clone());
        Self {
            config,
            tracker,
            words: Vec::new(),
            blue_timer: RepeatTimer::default(),
            auto_type_timer: RepeatTimer::default(),
        }
    }

    /// Rebuilds every segment with fresh words for a new run.
    pub fn reset(&mut self, rng: &mut dyn RandomSource, source: &dyn WordSource) {
        self.tracker.reset();
        self.blue_timer.reset();
        self.auto_type_timer.reset();
        self.words = (0..self.tracker.segment_count())
            .map(|flat| {
                let ring = self.tracker.from_flat_index(flat).map_or(0, |id| id.ring);
                let len = self.word_length(ring);
                let text = source.pick_word(rng, len, len);
                Some(DefenseWord::new(WordId(flat as u32), &text, 1))
            })
            .collect();
    }

    pub fn tracker(&self) -> &WallTracker {
        &self.tracker
    }

    pub fn segment_word(&self, id: WallSegmentId) -> Option<&DefenseWord> {
        let flat = self.tracker.to_flat_index(id)?;
        self.words.get(flat)?.as_ref()
    }

    /// Feeds one character to every standing segment on a revealed ring.
    pub fn process_wall_char(
        &mut self,
        c: char,
        stats: &PlayerStats,
        events: &mut EventQueue,
    ) -> bool {
        let mut matched_any = false;
        for flat in 0..self.words.len() {
            let Some(id) = self.tracker.from_flat_index(flat) else {
                continue;
            };
            if !stats.is_ring_revealed(id.ring) {
                continue;
            }
            let Some(word) = self.words[flat].as_mut() else {
                continue;
            };
            if word.try_match_char(c) {
                matched_any = true;
                let matched = word.matched_count();
                tracing::trace!(segment = %id, ch = %c, matched, "wall char matched");
                events.push(GameEvent::WallCharMatched {
                    segment: id,
                    matched,
                });
                self.break_if_complete(flat, id, events);
            }
        }
        matched_any
    }

    /// Advances one random standing segment on a revealed ring by one
    /// character. Returns `false` when nothing is eligible.
    pub fn try_auto_type_segment(
        &mut self,
        stats: &PlayerStats,
        rng: &mut dyn RandomSource,
        events: &mut EventQueue,
    ) -> bool {
        let eligible: Vec<(usize, WallSegmentId)> = (0..self.words.len())
            .filter(|flat| self.words[*flat].is_some())
            .filter_map(|flat| self.tracker.from_flat_index(flat).map(|id| (flat, id)))
            .filter(|(_, id)| stats.is_ring_revealed(id.ring))
            .collect();
        if eligible.is_empty() {
            return false;
        }

        let (flat, id) = eligible[rng.index(eligible.len())];
        let Some(word) = self.words[flat].as_mut() else {
            return false;
        };
        if !word.force_match() {
            return false;
        }
        events.push(GameEvent::WallCharMatched {
            segment: id,
            matched: word.matched_count(),
        });
        self.break_if_complete(flat, id, events);
        true
    }

    /// Runs the blue word and wall auto-type timers during `Playing`.
    pub fn tick(
        &mut self,
        dt: f32,
        phase: GameState,
        combat: &mut WordManager,
        ctx: &mut CombatContext<'_>,
    ) {
        if phase != GameState::Playing || dt <= 0.0 {
            return;
        }

        for _ in 0..self.blue_timer.advance(dt, self.config.blue_word_interval) {
            self.spawn_blue_word(combat, ctx);
        }

        for _ in 0..self.auto_type_timer.advance(dt, ctx.stats.wall_auto_type_interval) {
            self.try_auto_type_segment(ctx.stats, ctx.rng, ctx.events);
        }
    }

    /// Sends a blue word in from a random partially broken side.
    pub fn spawn_blue_word(
        &mut self,
        combat: &mut WordManager,
        ctx: &mut CombatContext<'_>,
    ) -> Option<WordId> {
        let sides = self.tracker.partially_broken_sides();
        if sides.is_empty() {
            return None;
        }
        let origin = sides[ctx.rng.index(sides.len())];
        let (min_len, max_len) = combat.config().length_range(ctx.run.current_level());
        let text = ctx.words.pick_word(ctx.rng, min_len, max_len);
        let word = DefenseWord::blue(WordId(0), &text, self.config.blue_word_coin_reward);
        let id = combat.add_external_word(word, Some(origin), ctx.events);
        tracing::debug!(%id, ring = origin.ring, side = origin.side, "blue word spawned");
        Some(id)
    }

    fn break_if_complete(&mut self, flat: usize, id: WallSegmentId, events: &mut EventQueue) {
        if self.words[flat]
            .as_ref()
            .is_some_and(DefenseWord::is_completed)
        {
            self.words[flat] = None;
            self.tracker.break_segment(id, events);
        }
    }

    fn word_length(&self, ring: usize) -> usize {
        self.config.base_word_length + ring
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EnergyConfig, RingLayout, WordConfig};
    use crate::env::{PcgRng, WordList};
    use crate::state::{EnergyTracker, LetterTracker, RunManager};

    fn config() -> WallConfig {
        WallConfig {
            rings: vec![RingLayout::new(3, 6.0), RingLayout::new(2, 9.0)],
            base_word_length: 4,
            blue_word_interval: 2.0,
            blue_word_coin_reward: 5,
        }
    }

    fn wall(words: &WordList, rng: &mut PcgRng) -> WallManager {
        let mut wall = WallManager::new(config());
        wall.reset(rng, words);
        wall
    }

    fn revealed(rings: u32) -> PlayerStats {
        PlayerStats {
            wall_reveal_level: rings,
            ..PlayerStats::base()
        }
    }

    #[test]
    fn reset_builds_one_word_per_segment() {
        let words = WordList::new(["wall", "stone"]);
        let mut rng = PcgRng::new(1);
        let wall = wall(&words, &mut rng);
        for id in wall.tracker().segments() {
            let word = wall.segment_word(id).expect("standing segment");
            assert_eq!(word.len(), 4 + id.ring);
        }
    }

    #[test]
    fn hidden_rings_ignore_input() {
        let words = WordList::new(["wall"]);
        let mut rng = PcgRng::new(1);
        let mut wall = wall(&words, &mut rng);
        let mut events = EventQueue::new();
        assert!(!wall.process_wall_char('w', &PlayerStats::base(), &mut events));
        assert!(events.is_empty());
    }

    #[test]
    fn typing_breaks_every_matching_segment_and_completes_ring() {
        let words = WordList::new(["wall"]);
        let mut rng = PcgRng::new(1);
        let mut wall = wall(&words, &mut rng);
        let stats = revealed(1);
        let mut events = EventQueue::new();

        for c in "wall".chars() {
            assert!(wall.process_wall_char(c, &stats, &mut events));
        }
        assert!(wall.tracker().is_ring_complete(0));
        assert!(!wall.tracker().is_ring_complete(1));
        let completions = events
            .iter()
            .filter(|e| matches!(e, GameEvent::RingCompleted { .. }))
            .count();
        assert_eq!(completions, 1);

        // Broken segments no longer accept input.
        events.clear();
        assert!(!wall.process_wall_char('w', &stats, &mut events));
    }

    #[test]
    fn auto_type_finishes_a_segment() {
        let words = WordList::new(["wall"]);
        let mut rng = PcgRng::new(3);
        let mut wall = wall(&words, &mut rng);
        let stats = revealed(1);
        let mut events = EventQueue::new();

        for _ in 0..4 * 12 {
            assert!(wall.try_auto_type_segment(&stats, &mut rng, &mut events));
        }
        assert!(wall.tracker().is_ring_complete(0));
        assert!(!wall.try_auto_type_segment(&stats, &mut rng, &mut events));
    }

    #[test]
    fn blue_words_come_from_partially_broken_sides() {
        let words = WordList::new(["wall", "sky"]);
        let mut rng = PcgRng::new(5);
        let mut wall = wall(&words, &mut rng);
        let stats = revealed(1);
        let mut events = EventQueue::new();
        let mut combat = WordManager::new(WordConfig::default(), 20);
        combat.reset(1);
        let mut run = RunManager::new();
        run.reset(1, &stats, &mut events);
        let mut energy = EnergyTracker::new(EnergyConfig::default());
        let mut letters = LetterTracker::new();

        let mut ctx = CombatContext::new(
            &stats,
            &mut run,
            &mut energy,
            &mut letters,
            &mut rng,
            &words,
            &mut events,
        );
        // Nothing broken yet.
        wall.tick(2.0, GameState::Playing, &mut combat, &mut ctx);
        assert_eq!(combat.active_count(), 0);

        let segment = WallSegmentId::new(0, 3, 1);
        for _ in 0..4 {
            let flat = wall.tracker.to_flat_index(segment).expect("valid");
            if let Some(word) = wall.words[flat].as_mut() {
                word.force_match();
            }
            wall.break_if_complete(flat, segment, ctx.events);
        }
        assert!(wall.tracker().is_broken(segment));

        wall.tick(2.0, GameState::Playing, &mut combat, &mut ctx);
        assert_eq!(combat.active_count(), 1);
        let blue = &combat.words()[0];
        assert_eq!(blue.coin_reward(), 5);
        let origin = ctx.events.iter().find_map(|e| match e {
            GameEvent::WordSpawned { origin, .. } => *origin,
            _ => None,
        });
        assert_eq!(origin, Some(segment.origin()));
    }
}
