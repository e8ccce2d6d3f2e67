//! Active word list and the rules that resolve keystrokes against it.

use super::CombatContext;
use crate::config::WordConfig;
use crate::env::RandomSource;
use crate::events::{EventQueue, GameEvent};
use crate::flow::GameState;
use crate::state::{DefenseWord, LetterKind, WordId, WordKind};
use crate::stats::PlayerStats;
use crate::timer::RepeatTimer;
use crate::wall::SideOrigin;

/// Rare letters, rolled rarest first.
const RARE_LETTERS: [LetterKind; 4] = [LetterKind::E, LetterKind::D, LetterKind::C, LetterKind::B];

/// Owns the live words of a run plus the warp/boss sequence.
///
/// At most one warp word and one boss word are alive at a time, and the warp
/// word is only armed while no boss is alive.
#[derive(Clone, Debug)]
pub struct WordManager {
    config: WordConfig,
    /// Warp is never armed on this level or beyond.
    final_level: u32,
    words: Vec<DefenseWord>,
    spawn_timer: RepeatTimer,
    auto_type_timer: RepeatTimer,
    kill_count: u32,
    warp_word: Option<WordId>,
    boss_word: Option<WordId>,
    next_id: u32,
}

impl WordManager {
    pub fn new(config: WordConfig, final_level: u32) -> Self {
        Self {
            config,
            final_level,
            words: Vec::new(),
            spawn_timer: RepeatTimer::default(),
            auto_type_timer: RepeatTimer::default(),
            kill_count: 0,
            warp_word: None,
            boss_word: None,
            next_id: 0,
        }
    }

    /// Clears every word and counter for a run starting at `level`.
    pub fn reset(&mut self, level: u32) {
        self.words.clear();
        self.spawn_timer.reset();
        self.auto_type_timer.reset();
        self.kill_count = 0;
        self.warp_word = None;
        self.boss_word = None;
    }

    pub fn config(&self) -> &WordConfig {
        &self.config
    }

    pub fn words(&self) -> &[DefenseWord] {
        &self.words
    }

    pub fn word(&self, id: WordId) -> Option<&DefenseWord> {
        self.words.iter().find(|word| word.id() == id)
    }

    pub fn active_count(&self) -> usize {
        self.words.len()
    }

    pub fn kill_count(&self) -> u32 {
        self.kill_count
    }

    pub fn warp_word(&self) -> Option<WordId> {
        self.warp_word
    }

    pub fn boss_word(&self) -> Option<WordId> {
        self.boss_word
    }

    /// Advances spawn and auto-type timers. Does nothing outside `Playing`.
    pub fn tick(&mut self, dt: f32, phase: GameState, ctx: &mut CombatContext<'_>) {
        if phase != GameState::Playing || dt <= 0.0 {
            return;
        }

        let spawn_interval = self.config.spawn_interval(ctx.run.current_level());
        for _ in 0..self.spawn_timer.advance(dt, spawn_interval) {
            if self.regular_count() < self.config.max_active_words {
                self.spawn_word(ctx);
            }
        }

        if ctx.stats.auto_type_count > 0 {
            for _ in 0..self.auto_type_timer.advance(dt, ctx.stats.auto_type_interval) {
                self.auto_type(ctx);
            }
        }
    }

    /// Spawns one regular word sized and armored for the current level.
    pub fn spawn_word(&mut self, ctx: &mut CombatContext<'_>) -> WordId {
        let level = ctx.run.current_level();
        let (min_len, max_len) = self.config.length_range(level);
        let text = ctx.words.pick_word(ctx.rng, min_len, max_len);
        let id = self.allocate_id();
        self.insert(DefenseWord::new(id, &text, WordConfig::word_hp(level)), None, ctx.events)
    }

    /// Adds a word built elsewhere (blue words from the wall). The word gets
    /// a fresh id, which is returned.
    pub fn add_external_word(
        &mut self,
        mut word: DefenseWord,
        origin: Option<SideOrigin>,
        events: &mut EventQueue,
    ) -> WordId {
        let id = self.allocate_id();
        word.set_id(id);
        self.insert(word, origin, events)
    }

    /// Feeds one typed character to every active word.
    ///
    /// Returns whether any word matched. The caller decides whether a miss
    /// is an input error (the wall may still accept the character).
    pub fn process_char(&mut self, c: char, ctx: &mut CombatContext<'_>) -> bool {
        let matched: Vec<(WordId, usize)> = self
            .words
            .iter_mut()
            .filter_map(|word| {
                word.try_match_char(c)
                    .then(|| (word.id(), word.matched_count()))
            })
            .collect();

        for &(id, count) in &matched {
            tracing::trace!(%id, ch = %c, matched = count, "char matched");
            ctx.events.push(GameEvent::CharMatched { id, matched: count });
            self.resolve_match(id, ctx);
        }
        !matched.is_empty()
    }

    /// A word touched the player. Regular words deal one point of damage
    /// and are removed; the boss is immune and stays.
    pub fn handle_word_reached_center(&mut self, id: WordId, ctx: &mut CombatContext<'_>) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        if self.words[index].is_boss() {
            return false;
        }

        self.words.remove(index);
        if self.warp_word == Some(id) {
            self.warp_word = None;
        }
        ctx.events.push(GameEvent::WordReachedCenter { id });
        ctx.run.take_damage(1, ctx.events);
        true
    }

    /// Removes every word without resolving it (run teardown).
    pub fn dissipate_all(&mut self) {
        self.words.clear();
        self.warp_word = None;
        self.boss_word = None;
    }

    fn resolve_match(&mut self, id: WordId, ctx: &mut CombatContext<'_>) {
        let Some(index) = self.position(id) else {
            return;
        };

        if self.warp_word == Some(id) {
            if self.words[index].is_completed() {
                self.complete_warp(index, ctx);
            }
            return;
        }

        let word = &self.words[index];
        if !word.is_completed() {
            let crit = ctx.stats.crit_chance;
            if !word.is_boss() && crit > 0.0 && ctx.rng.chance(crit) {
                let word = self.words.remove(index);
                ctx.events.push(GameEvent::CriticalKill { id });
                tracing::debug!(%id, "critical kill");
                self.resolve_kill(word, ctx);
            }
            return;
        }

        self.resolve_completion(index, ctx);
    }

    fn resolve_completion(&mut self, index: usize, ctx: &mut CombatContext<'_>) {
        let stats = ctx.stats;
        let word = &mut self.words[index];
        let id = word.id();
        ctx.events.push(GameEvent::WordCompleted { id });

        let mut damage = stats.base_damage;
        if word.is_boss() {
            damage += stats.boss_bonus_damage;
            ctx.energy.add_energy(self.config.boss_hit_energy, ctx.events);
        }
        word.take_damage(damage);

        if word.is_dead() {
            let word = self.words.remove(index);
            self.resolve_kill(word, ctx);
            return;
        }

        let (min_len, max_len) = if word.is_boss() {
            (self.config.boss_min_length, self.config.boss_max_length)
        } else {
            self.config.length_range(ctx.run.current_level())
        };
        let text = ctx.words.pick_word(ctx.rng, min_len, max_len);
        word.rearm(&text);
        ctx.events.push(GameEvent::WordTextChanged {
            id,
            text: word.text(),
        });
        if word.is_boss() {
            ctx.events.push(GameEvent::BossHit {
                id,
                remaining_hp: word.current_hp(),
            });
        }
    }

    fn resolve_kill(&mut self, word: DefenseWord, ctx: &mut CombatContext<'_>) {
        let id = word.id();
        if word.is_boss() {
            self.boss_word = None;
            ctx.run.add_prestige(self.config.boss_prestige_reward);
            let level = ctx.run.current_level();
            ctx.events.push(GameEvent::BossDefeated {
                level,
                prestige: ctx.run.prestige_currency(),
            });
            tracing::info!(level, "boss defeated");
        } else {
            match word.kind() {
                WordKind::Blue => ctx.letters.add_coins(word.coin_reward(), ctx.events),
                WordKind::Normal => {
                    for _ in 0..ctx.stats.letters_per_kill {
                        let kind = roll_letter(ctx.stats, ctx.rng);
                        ctx.letters.add_letter(kind, ctx.events);
                    }
                    ctx.energy.add_energy(ctx.stats.energy_per_kill, ctx.events);
                    self.kill_count += 1;
                }
            }
            tracing::debug!(%id, kind = %word.kind(), kills = self.kill_count, "word killed");
        }
        self.try_arm_warp(ctx.run.current_level(), ctx.events);
    }

    fn try_arm_warp(&mut self, level: u32, events: &mut EventQueue) {
        if self.kill_count < self.config.kills_to_warp
            || self.warp_word.is_some()
            || self.boss_word.is_some()
            || level >= self.final_level
        {
            return;
        }
        let id = self.allocate_id();
        let word = DefenseWord::new(id, &self.config.warp_text, 1);
        self.warp_word = Some(id);
        self.insert(word, None, events);
        events.push(GameEvent::WarpReady { id });
        tracing::info!(level, %id, "warp ready");
    }

    fn complete_warp(&mut self, index: usize, ctx: &mut CombatContext<'_>) {
        self.words.remove(index);
        self.warp_word = None;
        self.kill_count = 0;

        let level = ctx.run.advance_level(ctx.events);
        ctx.events.push(GameEvent::WarpCompleted { level });
        tracing::info!(level, "warp completed");

        if level == self.config.boss_level && self.boss_word.is_none() {
            self.spawn_boss(level, ctx);
        }
    }

    fn spawn_boss(&mut self, level: u32, ctx: &mut CombatContext<'_>) {
        let text = ctx.words.pick_word(
            ctx.rng,
            self.config.boss_min_length,
            self.config.boss_max_length,
        );
        let id = self.allocate_id();
        self.boss_word = Some(id);
        self.insert(DefenseWord::boss(id, &text, self.config.boss_hp), None, ctx.events);
        ctx.events.push(GameEvent::BossSpawned { id, level });
        tracing::info!(level, %id, "boss spawned");
    }

    /// Types the next character of up to `auto_type_count` words, picking
    /// distinct characters at random.
    fn auto_type(&mut self, ctx: &mut CombatContext<'_>) {
        let mut candidates: Vec<char> = Vec::new();
        for c in self.words.iter().filter_map(DefenseWord::next_char) {
            if !candidates.contains(&c) {
                candidates.push(c);
            }
        }

        let picks = (ctx.stats.auto_type_count as usize).min(candidates.len());
        for _ in 0..picks {
            let c = candidates.swap_remove(ctx.rng.index(candidates.len()));
            self.process_char(c, ctx);
        }
    }

    /// Words subject to the spawn cap.
    fn regular_count(&self) -> usize {
        self.words
            .iter()
            .filter(|word| Some(word.id()) != self.warp_word && !word.is_boss())
            .count()
    }

    fn position(&self, id: WordId) -> Option<usize> {
        self.words.iter().position(|word| word.id() == id)
    }

    fn allocate_id(&mut self) -> WordId {
        let id = WordId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    fn insert(
        &mut self,
        word: DefenseWord,
        origin: Option<SideOrigin>,
        events: &mut EventQueue,
    ) -> WordId {
        let id = word.id();
        tracing::debug!(%id, text = %word.text(), hp = word.max_hp(), "word spawned");
        events.push(GameEvent::WordSpawned {
            id,
            text: word.text(),
            hp: word.max_hp(),
            kind: word.kind(),
            is_boss: word.is_boss(),
            origin,
        });
        self.words.push(word);
        id
    }
}

/// One letter drop: each rare kind is rolled from rarest to most common,
/// falling back to `A`.
fn roll_letter(stats: &PlayerStats, rng: &mut dyn RandomSource) -> LetterKind {
    RARE_LETTERS
        .into_iter()
        .find(|kind| {
            let chance = stats.letter_chance(*kind);
            chance > 0.0 && rng.chance(chance)
        })
        .unwrap_or(LetterKind::A)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnergyConfig;
    use crate::env::WordList;
    use crate::state::{EnergyTracker, LetterTracker, RunManager};

    /// Replays a fixed float sequence; integer draws always return zero.
    struct ScriptedRng {
        floats: Vec<f32>,
        pos: usize,
    }

    impl ScriptedRng {
        fn new(floats: &[f32]) -> Self {
            Self {
                floats: floats.to_vec(),
                pos: 0,
            }
        }
    }

    impl RandomSource for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_f32(&mut self) -> f32 {
            let value = self.floats[self.pos % self.floats.len()];
            self.pos += 1;
            value
        }
    }

    struct Fixture {
        stats: PlayerStats,
        run: RunManager,
        energy: EnergyTracker,
        letters: LetterTracker,
        rng: ScriptedRng,
        words: WordList,
        events: EventQueue,
    }

    impl Fixture {
        fn new(words: &[&str]) -> Self {
            let stats = PlayerStats::base();
            let mut events = EventQueue::new();
            let mut run = RunManager::new();
            run.reset(1, &stats, &mut events);
            let mut energy = EnergyTracker::new(EnergyConfig::default());
            energy.reset(&stats, &mut events);
            events.clear();
            Self {
                stats,
                run,
                energy,
                letters: LetterTracker::new(),
                // Never passes a rare-letter or crit roll.
                rng: ScriptedRng::new(&[0.99]),
                words: WordList::new(words.iter().copied()),
                events,
            }
        }

        fn ctx(&mut self) -> CombatContext<'_> {
            CombatContext::new(
                &self.stats,
                &mut self.run,
                &mut self.energy,
                &mut self.letters,
                &mut self.rng,
                &self.words,
                &mut self.events,
            )
        }
    }

    fn manager() -> WordManager {
        let mut manager = WordManager::new(WordConfig::default(), 20);
        manager.reset(1);
        manager
    }

    fn add(manager: &mut WordManager, fx: &mut Fixture, text: &str, hp: u32) -> WordId {
        manager.add_external_word(DefenseWord::new(WordId(0), text, hp), None, &mut fx.events)
    }

    fn type_str(manager: &mut WordManager, fx: &mut Fixture, text: &str) {
        for c in text.chars() {
            manager.process_char(c, &mut fx.ctx());
        }
    }

    fn count(events: &EventQueue, pred: impl Fn(&GameEvent) -> bool) -> usize {
        events.iter().filter(|event| pred(event)).count()
    }

    #[test]
    fn typing_a_word_kills_it_and_pays_out() {
        let mut fx = Fixture::new(&["cat"]);
        fx.stats.energy_per_kill = 1.25;
        let mut manager = manager();
        // Drain first so the kill reward is not hidden by the cap.
        fx.energy
            .tick(2.5, GameState::Playing, 1, &fx.stats, &mut fx.events);
        assert_eq!(fx.energy.current(), 7.5);
        add(&mut manager, &mut fx, "cat", 1);

        assert!(manager.process_char('C', &mut fx.ctx()));
        assert!(manager.process_char('a', &mut fx.ctx()));
        assert!(manager.process_char('t', &mut fx.ctx()));

        assert_eq!(manager.active_count(), 0);
        assert_eq!(manager.kill_count(), 1);
        assert_eq!(fx.letters.letter_count(LetterKind::A), 1);
        assert_eq!(fx.energy.current(), 7.5 + 1.25);
        assert_eq!(count(&fx.events, |e| matches!(e, GameEvent::WordCompleted { .. })), 1);
    }

    #[test]
    fn unmatched_char_reports_no_match() {
        let mut fx = Fixture::new(&["cat"]);
        let mut manager = manager();
        add(&mut manager, &mut fx, "cat", 1);
        assert!(!manager.process_char('x', &mut fx.ctx()));
        assert_eq!(manager.words()[0].matched_count(), 0);
    }

    #[test]
    fn every_matching_word_advances() {
        let mut fx = Fixture::new(&["cat"]);
        let mut manager = manager();
        add(&mut manager, &mut fx, "cat", 1);
        add(&mut manager, &mut fx, "car", 1);
        add(&mut manager, &mut fx, "dog", 1);

        manager.process_char('c', &mut fx.ctx());
        let matched: Vec<usize> = manager.words().iter().map(|w| w.matched_count()).collect();
        assert_eq!(matched, vec![1, 1, 0]);
    }

    #[test]
    fn multi_hit_word_rearms_with_new_text() {
        let mut fx = Fixture::new(&["bat"]);
        let mut manager = manager();
        let id = add(&mut manager, &mut fx, "cat", 2);

        type_str(&mut manager, &mut fx, "cat");
        let word = manager.word(id).expect("still alive");
        assert_eq!(word.current_hp(), 1);
        assert_eq!(word.matched_count(), 0);
        assert_eq!(word.text(), "bat");

        type_str(&mut manager, &mut fx, "bat");
        assert!(manager.word(id).is_none());
        assert_eq!(manager.kill_count(), 1);
    }

    #[test]
    fn crit_kills_regular_words_but_never_the_boss() {
        let mut fx = Fixture::new(&["bossword"]);
        fx.stats.crit_chance = 0.5;
        fx.rng = ScriptedRng::new(&[0.1]);
        let mut manager = manager();
        let tough = add(&mut manager, &mut fx, "dog", 5);
        manager.process_char('d', &mut fx.ctx());
        assert!(manager.word(tough).is_none());
        assert_eq!(count(&fx.events, |e| matches!(e, GameEvent::CriticalKill { .. })), 1);
        assert_eq!(manager.kill_count(), 1);

        let boss = manager.add_external_word(
            DefenseWord::boss(WordId(0), "bossword", 3),
            None,
            &mut fx.events,
        );
        manager.process_char('b', &mut fx.ctx());
        assert_eq!(manager.word(boss).map(|w| w.current_hp()), Some(3));
    }

    #[test]
    fn rare_letters_roll_rarest_first() {
        let mut stats = PlayerStats::base();
        stats.letter_chances = [1.0, 0.5, 0.5, 0.5, 0.5];
        // E fails, D passes.
        let mut rng = ScriptedRng::new(&[0.9, 0.1]);
        assert_eq!(roll_letter(&stats, &mut rng), LetterKind::D);

        let mut rng = ScriptedRng::new(&[0.9]);
        assert_eq!(roll_letter(&stats, &mut rng), LetterKind::A);
    }

    #[test]
    fn blue_words_pay_coins_and_do_not_count_toward_warp() {
        let mut fx = Fixture::new(&["cat"]);
        let mut manager = manager();
        manager.add_external_word(
            DefenseWord::blue(WordId(0), "sky", 7),
            Some(SideOrigin::new(0, 1)),
            &mut fx.events,
        );
        type_str(&mut manager, &mut fx, "sky");
        assert_eq!(fx.letters.coins(), 7);
        assert_eq!(fx.letters.total_letters(), 0);
        assert_eq!(manager.kill_count(), 0);
    }

    #[test]
    fn twenty_kills_arm_warp_which_advances_the_level() {
        let mut fx = Fixture::new(&["cat"]);
        let mut manager = manager();

        for _ in 0..20 {
            add(&mut manager, &mut fx, "cat", 1);
            type_str(&mut manager, &mut fx, "cat");
        }
        let warp = manager.warp_word().expect("warp armed");
        assert_eq!(manager.word(warp).map(DefenseWord::text).as_deref(), Some("warp"));

        // A second threshold crossing does not arm another warp word.
        add(&mut manager, &mut fx, "cat", 1);
        type_str(&mut manager, &mut fx, "cat");
        assert_eq!(count(&fx.events, |e| matches!(e, GameEvent::WarpReady { .. })), 1);

        type_str(&mut manager, &mut fx, "warp");
        assert_eq!(fx.run.current_level(), 2);
        assert_eq!(manager.kill_count(), 0);
        assert_eq!(manager.warp_word(), None);
        assert_eq!(
            count(&fx.events, |e| matches!(e, GameEvent::WarpCompleted { level: 2 })),
            1
        );
    }

    #[test]
    fn warp_into_boss_level_spawns_boss_until_defeated() {
        let mut fx = Fixture::new(&["bossword"]);
        let config = WordConfig {
            kills_to_warp: 1,
            boss_level: 2,
            boss_hp: 2,
            ..WordConfig::default()
        };
        let mut manager = WordManager::new(config, 20);
        manager.reset(1);

        add(&mut manager, &mut fx, "cat", 1);
        type_str(&mut manager, &mut fx, "cat");
        type_str(&mut manager, &mut fx, "warp");

        let boss = manager.boss_word().expect("boss spawned");
        assert!(manager.word(boss).is_some_and(DefenseWord::is_boss));

        // Boss blocks warp arming even past the kill threshold.
        add(&mut manager, &mut fx, "cat", 1);
        type_str(&mut manager, &mut fx, "cat");
        assert_eq!(manager.warp_word(), None);

        let energy_before = fx.energy.current();
        type_str(&mut manager, &mut fx, "bossword");
        assert_eq!(manager.word(boss).map(|w| w.current_hp()), Some(1));
        assert!(fx.energy.current() > energy_before || fx.energy.current() == fx.energy.max());
        assert_eq!(count(&fx.events, |e| matches!(e, GameEvent::BossHit { .. })), 1);

        type_str(&mut manager, &mut fx, "bossword");
        assert_eq!(manager.boss_word(), None);
        assert_eq!(fx.run.prestige_currency(), 1);
        assert_eq!(
            count(&fx.events, |e| matches!(e, GameEvent::BossDefeated { level: 2, .. })),
            1
        );
        // The pending kill count arms warp once the boss is gone.
        assert!(manager.warp_word().is_some());
    }

    #[test]
    fn warp_is_not_armed_on_the_final_level() {
        let mut fx = Fixture::new(&["cat"]);
        let config = WordConfig {
            kills_to_warp: 1,
            ..WordConfig::default()
        };
        let mut manager = WordManager::new(config, 1);
        manager.reset(1);
        add(&mut manager, &mut fx, "cat", 1);
        type_str(&mut manager, &mut fx, "cat");
        assert_eq!(manager.warp_word(), None);
    }

    #[test]
    fn reaching_center_hurts_except_for_the_boss() {
        let mut fx = Fixture::new(&["cat"]);
        let mut manager = manager();
        let word = add(&mut manager, &mut fx, "cat", 1);
        let boss = manager.add_external_word(
            DefenseWord::boss(WordId(0), "bossword", 3),
            None,
            &mut fx.events,
        );

        assert!(manager.handle_word_reached_center(word, &mut fx.ctx()));
        assert_eq!(fx.run.current_hp(), PlayerStats::BASE_MAX_HP - 1);
        assert!(!manager.handle_word_reached_center(boss, &mut fx.ctx()));
        assert!(manager.word(boss).is_some());
        assert_eq!(fx.run.current_hp(), PlayerStats::BASE_MAX_HP - 1);
    }

    #[test]
    fn spawning_respects_the_active_cap() {
        let mut fx = Fixture::new(&["cat", "dog", "bird"]);
        let config = WordConfig {
            max_active_words: 2,
            ..WordConfig::default()
        };
        let mut manager = WordManager::new(config, 20);
        manager.reset(1);

        for _ in 0..20 {
            manager.tick(1.0, GameState::Playing, &mut fx.ctx());
        }
        assert_eq!(manager.active_count(), 2);

        manager.tick(100.0, GameState::Menu, &mut fx.ctx());
        assert_eq!(manager.active_count(), 2);
    }

    #[test]
    fn long_frame_keeps_the_spawn_cadence() {
        let mut fx = Fixture::new(&["cat", "dog", "bird"]);
        let mut manager = manager();
        let interval = manager.config().spawn_interval(1);

        manager.tick(interval * 3.5, GameState::Playing, &mut fx.ctx());
        assert_eq!(manager.active_count(), 3);
        // Only reaches a full interval with the long frame's leftover.
        manager.tick(interval * 0.6, GameState::Playing, &mut fx.ctx());
        assert_eq!(manager.active_count(), 4);
    }

    #[test]
    fn auto_typing_advances_words_on_its_interval() {
        let mut fx = Fixture::new(&["cat"]);
        fx.stats.auto_type_interval = 1.0;
        let mut manager = manager();
        let id = add(&mut manager, &mut fx, "dog", 1);

        manager.tick(0.5, GameState::Playing, &mut fx.ctx());
        assert_eq!(manager.word(id).map(DefenseWord::matched_count), Some(0));
        manager.tick(0.5, GameState::Playing, &mut fx.ctx());
        assert_eq!(manager.word(id).map(DefenseWord::matched_count), Some(1));
    }

    #[test]
    fn matching_invariant_holds_through_play() {
        let mut fx = Fixture::new(&["alpha", "beta", "gamma"]);
        fx.stats.auto_type_interval = 0.3;
        fx.stats.auto_type_count = 2;
        let mut manager = manager();
        for step in 0..200 {
            manager.tick(0.25, GameState::Playing, &mut fx.ctx());
            let c = ['a', 'b', 'g', 'm', 'l'][step % 5];
            manager.process_char(c, &mut fx.ctx());
            for word in manager.words() {
                assert!(word.matched_count() <= word.len());
                assert_eq!(word.is_completed(), word.matched_count() == word.len());
            }
        }
    }
}
