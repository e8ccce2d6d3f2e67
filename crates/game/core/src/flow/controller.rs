//! Top-level state machine and the single logic driver for a session.
//!
//! The host calls [`GameFlowController::tick`] once per frame with the
//! elapsed time and the characters typed since the previous frame. Every
//! other public method is a discrete player or presentation action. Each
//! call collects events into an internal queue and publishes them on the
//! [`EventBus`] right before returning, so listeners never observe a
//! half-applied update.

use super::collection::{CollectionPhaseController, CollectionTick};
use super::phase::{GameState, TransitionError};
use super::progress::ProgressFlags;
use crate::combat::{CombatContext, WordManager};
use crate::config::{ConfigError, GameConfig};
use crate::converter::{ConverterInput, ConverterManager};
use crate::env::{RandomSource, WordSource};
use crate::error::GameError;
use crate::events::{EventBus, EventQueue, GameEvent, RunEndReason, SubscriptionId, Topic};
use crate::save::SaveData;
use crate::state::{EnergyTick, EnergyTracker, LetterTracker, RunManager, WordId};
use crate::stats::PlayerStats;
use crate::timer::RepeatTimer;
use crate::upgrade::{NodeId, PurchaseError, UpgradeGraphConfig, UpgradeTracker};
use crate::wall::{ArenaBounds, WallManager};

/// Owns every subsystem and sequences them.
pub struct GameFlowController {
    config: GameConfig,
    state: GameState,
    rng: Box<dyn RandomSource>,
    word_source: Box<dyn WordSource>,

    // Persistent across runs.
    stats: PlayerStats,
    upgrades: UpgradeTracker,
    letters: LetterTracker,
    flags: ProgressFlags,
    highest_unlocked_level: u32,
    defeated_boss_levels: Vec<bool>,

    // Per run.
    run: RunManager,
    energy: EnergyTracker,
    words: WordManager,
    wall: WallManager,
    collection: CollectionPhaseController,

    converter: ConverterManager,

    autosave_timer: RepeatTimer,
    events: EventQueue,
    bus: EventBus,
}

impl GameFlowController {
    /// Validates `config` and builds a session in `Menu` with fresh progress.
    pub fn new(
        config: GameConfig,
        graph: UpgradeGraphConfig,
        word_source: impl WordSource + 'static,
        rng: impl RandomSource + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let upgrades = UpgradeTracker::new(graph);
        let mut stats = PlayerStats::base();
        upgrades.apply_all_upgrades(&mut stats);

        Ok(Self {
            state: GameState::Menu,
            rng: Box::new(rng),
            word_source: Box::new(word_source),
            stats,
            upgrades,
            letters: LetterTracker::new(),
            flags: ProgressFlags::empty(),
            highest_unlocked_level: 1,
            defeated_boss_levels: vec![false; config.total_levels as usize],
            run: RunManager::new(),
            energy: EnergyTracker::new(config.energy.clone()),
            words: WordManager::new(config.words.clone(), config.total_levels),
            wall: WallManager::new(config.wall.clone()),
            collection: CollectionPhaseController::new(config.collection.clone()),
            converter: ConverterManager::new(config.converter.clone()),
            autosave_timer: RepeatTimer::default(),
            events: EventQueue::new(),
            bus: EventBus::new(),
            config,
        })
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    pub fn upgrades(&self) -> &UpgradeTracker {
        &self.upgrades
    }

    pub fn letters(&self) -> &LetterTracker {
        &self.letters
    }

    pub fn run(&self) -> &RunManager {
        &self.run
    }

    pub fn energy(&self) -> &EnergyTracker {
        &self.energy
    }

    pub fn words(&self) -> &WordManager {
        &self.words
    }

    pub fn wall(&self) -> &WallManager {
        &self.wall
    }

    pub fn collection(&self) -> &CollectionPhaseController {
        &self.collection
    }

    pub fn converter(&self) -> &ConverterManager {
        &self.converter
    }

    pub fn flags(&self) -> ProgressFlags {
        self.flags
    }

    pub fn highest_unlocked_level(&self) -> u32 {
        self.highest_unlocked_level
    }

    pub fn defeated_boss_levels(&self) -> &[bool] {
        &self.defeated_boss_levels
    }

    /// Area new words may spawn in for the current wall state.
    pub fn spawn_bounds(&self) -> ArenaBounds {
        self.wall.tracker().spawn_bounds()
    }

    /// Spawn bounds plus the configured camera padding.
    pub fn camera_bounds(&self) -> ArenaBounds {
        self.wall.tracker().camera_bounds(self.config.camera_padding)
    }

    /// Scale the host applies to gameplay time (animations, word motion).
    pub fn time_scale(&self) -> f32 {
        if self.collection.is_active() {
            self.collection.time_scale()
        } else {
            1.0
        }
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    pub fn subscribe(
        &mut self,
        topic: Topic,
        listener: impl FnMut(&GameEvent) + 'static,
    ) -> SubscriptionId {
        self.bus.subscribe(topic, listener)
    }

    pub fn subscribe_all(&mut self, listener: impl FnMut(&GameEvent) + 'static) -> SubscriptionId {
        self.bus.subscribe_all(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Registers a predicate that keeps the collection freeze held.
    pub fn set_collection_hold(&mut self, hold: impl Fn() -> bool + 'static) {
        self.collection.set_hold_predicate(hold);
    }

    pub fn clear_collection_hold(&mut self) {
        self.collection.clear_hold_predicate();
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Rebuilds stats from owned upgrades and starts a fresh run at `level`.
    pub fn start_run(&mut self, level: u32) -> Result<(), TransitionError> {
        let result = self.begin_run(level);
        self.finish_call(result)
    }

    /// Enters `Collecting`. Normally triggered by energy depletion.
    pub fn start_collection_phase(&mut self) -> Result<(), TransitionError> {
        let result = self.begin_collection();
        self.finish_call(result)
    }

    /// Completes a run after the collection phase and returns to `Menu`.
    pub fn handle_collection_ended(&mut self) -> Result<(), TransitionError> {
        let result = self.end_collection();
        self.finish_call(result)
    }

    /// Ends the run early (defeat or retreat) and returns to `Menu`.
    pub fn handle_run_ended(&mut self, reason: RunEndReason) -> Result<(), TransitionError> {
        let result = self.end_run(reason);
        self.finish_call(result)
    }

    pub fn retreat(&mut self) -> Result<(), TransitionError> {
        self.handle_run_ended(RunEndReason::Retreated)
    }

    // ------------------------------------------------------------------
    // Per-frame driver
    // ------------------------------------------------------------------

    /// Advances the session by `dt` real seconds and feeds `typed` in order.
    pub fn tick(&mut self, dt: f32, typed: &[char]) {
        let dt = dt.max(0.0);
        self.tick_autosave(dt);
        match self.state {
            GameState::Menu => {}
            GameState::Playing => self.tick_playing(dt, typed),
            GameState::Collecting => self.tick_collecting(dt),
        }
        self.dispatch();
    }

    /// Steers the converter for one frame. Ignored unless a session is open.
    pub fn tick_converter(&mut self, dt: f32, input: &ConverterInput) {
        self.converter
            .tick(dt, input, &self.stats, &mut self.letters, &mut self.events);
        self.dispatch();
    }

    // ------------------------------------------------------------------
    // Presentation callbacks
    // ------------------------------------------------------------------

    /// A word touched the player during `Playing`.
    pub fn handle_word_reached_center(&mut self, id: WordId) -> bool {
        if self.state != GameState::Playing {
            return false;
        }
        let hit = {
            let Self {
                stats,
                run,
                energy,
                letters,
                rng,
                word_source,
                events,
                words,
                ..
            } = self;
            let mut ctx = CombatContext::new(
                stats,
                run,
                energy,
                letters,
                &mut **rng,
                &**word_source,
                events,
            );
            words.handle_word_reached_center(id, &mut ctx)
        };
        self.check_defeat();
        self.dispatch();
        hit
    }

    /// A collectible word reached the black hole during `Collecting`.
    pub fn handle_word_hit_black_hole(&mut self) {
        if self.state == GameState::Collecting {
            self.collection
                .handle_word_hit_black_hole(&mut self.run, &mut self.events);
            self.check_defeat();
        }
        self.dispatch();
    }

    /// The player closed the collection tutorial; it will not hold again.
    pub fn dismiss_collection_tutorial(&mut self) {
        self.flags.insert(ProgressFlags::SEEN_COLLECTION_TUTORIAL);
        self.collection.release_tutorial_hold();
    }

    // ------------------------------------------------------------------
    // Menu actions
    // ------------------------------------------------------------------

    pub fn purchase_status(&self, node: &NodeId) -> Result<u64, PurchaseError> {
        self.upgrades.purchase_status(node, self.letters.coins())
    }

    /// Buys the next level of `node`. Only allowed in `Menu`.
    pub fn try_purchase(&mut self, node: &NodeId) -> bool {
        if self.state != GameState::Menu {
            return false;
        }
        let bought =
            self.upgrades
                .try_purchase(node, &mut self.letters, &mut self.stats, &mut self.events);
        self.dispatch();
        bought
    }

    /// Opens a converter session with the whole letter inventory.
    pub fn start_converting(&mut self) -> bool {
        if self.state != GameState::Menu {
            return false;
        }
        let started = self.converter.start_converting(
            &mut self.letters,
            &self.stats,
            &mut *self.rng,
            &mut self.events,
        );
        self.dispatch();
        started
    }

    /// Closes the converter session; uncollected letters go back to the
    /// inventory.
    pub fn finish_converting(&mut self) -> usize {
        let returned = self
            .converter
            .finish_converting(&mut self.letters, &mut self.events);
        self.dispatch();
        returned
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    pub fn capture_save(&self) -> SaveData {
        let mut save = SaveData {
            letters: self.letters.letters(),
            coins: self.letters.coins(),
            upgrades: self.upgrades.capture_state(),
            prestige_currency: self.run.prestige_currency(),
            highest_unlocked_level: self.highest_unlocked_level,
            defeated_boss_levels: self.defeated_boss_levels.clone(),
            ..SaveData::default()
        };
        save.set_flags(self.flags);
        save
    }

    /// Loads persisted progress. Only allowed in `Menu`.
    ///
    /// Out-of-range data is clamped or widened rather than rejected.
    pub fn restore_save(&mut self, save: &SaveData) -> Result<(), TransitionError> {
        if self.state != GameState::Menu {
            return Err(self.reject("restore_save"));
        }
        if self.converter.is_active() {
            self.converter
                .finish_converting(&mut self.letters, &mut self.events);
        }

        let total = self.config.total_levels;
        self.letters = LetterTracker::restore(save.letters, save.coins);
        self.upgrades.restore_state(&save.upgrades, &mut self.stats);
        self.flags = save.flags();
        self.run.restore_prestige(save.prestige_currency);
        self.highest_unlocked_level = save.highest_unlocked_level.clamp(1, total);
        if save.defeated_boss_levels.len() != total as usize {
            tracing::warn!(
                saved = save.defeated_boss_levels.len(),
                total,
                "resized defeated boss levels"
            );
        }
        self.defeated_boss_levels = save.defeated_boss_levels_for(total);
        tracing::info!(
            coins = save.coins,
            highest = self.highest_unlocked_level,
            "save restored"
        );
        self.dispatch();
        Ok(())
    }

    /// Host is backgrounding the app; returns the data to persist now.
    pub fn on_application_pause(&mut self) -> SaveData {
        tracing::info!("application paused, capturing save");
        self.capture_save()
    }

    /// Host is shutting down; returns the data to persist now.
    pub fn on_application_quit(&mut self) -> SaveData {
        tracing::info!("application quitting, capturing save");
        if self.converter.is_active() {
            self.converter
                .finish_converting(&mut self.letters, &mut self.events);
            self.dispatch();
        }
        self.capture_save()
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn begin_run(&mut self, level: u32) -> Result<(), TransitionError> {
        if self.state != GameState::Menu {
            return Err(self.reject("start_run"));
        }
        let total = self.config.total_levels;
        if level == 0 || level > total {
            return Err(TransitionError::LevelOutOfRange { level, total });
        }
        if level > self.highest_unlocked_level {
            return Err(TransitionError::LevelLocked {
                level,
                highest: self.highest_unlocked_level,
            });
        }
        if self.converter.is_active() {
            return Err(TransitionError::ConverterActive);
        }

        self.upgrades.apply_all_upgrades(&mut self.stats);
        self.run.reset(level, &self.stats, &mut self.events);
        self.energy.reset(&self.stats, &mut self.events);
        self.words.reset(level);
        self.wall.reset(&mut *self.rng, &*self.word_source);
        self.collection.force_end();

        self.set_state(GameState::Playing);
        self.events.push(GameEvent::RunStarted { level });
        tracing::info!(level, "run started");
        Ok(())
    }

    fn begin_collection(&mut self) -> Result<(), TransitionError> {
        if self.state != GameState::Playing {
            return Err(self.reject("start_collection_phase"));
        }
        let tutorial = !self
            .flags
            .contains(ProgressFlags::SEEN_COLLECTION_TUTORIAL);
        self.collection
            .start(self.stats.collection_duration, tutorial, &mut self.events);
        self.set_state(GameState::Collecting);
        Ok(())
    }

    fn end_collection(&mut self) -> Result<(), TransitionError> {
        if self.state != GameState::Collecting {
            return Err(self.reject("handle_collection_ended"));
        }
        self.collection.force_end();
        self.words.dissipate_all();
        self.flags.insert(ProgressFlags::COMPLETED_FIRST_RUN);
        self.set_state(GameState::Menu);
        let level = self.run.current_level();
        self.events.push(GameEvent::RunEnded {
            reason: RunEndReason::Completed,
            level,
        });
        tracing::info!(level, "run completed");
        Ok(())
    }

    fn end_run(&mut self, reason: RunEndReason) -> Result<(), TransitionError> {
        if !matches!(self.state, GameState::Playing | GameState::Collecting) {
            return Err(self.reject("handle_run_ended"));
        }
        self.collection.force_end();
        self.words.dissipate_all();
        self.set_state(GameState::Menu);
        let level = self.run.current_level();
        self.events.push(GameEvent::RunEnded { reason, level });
        tracing::info!(level, ?reason, "run ended");
        Ok(())
    }

    fn tick_playing(&mut self, dt: f32, typed: &[char]) {
        {
            let Self {
                stats,
                run,
                energy,
                letters,
                rng,
                word_source,
                events,
                words,
                wall,
                ..
            } = self;
            let mut ctx = CombatContext::new(
                stats,
                run,
                energy,
                letters,
                &mut **rng,
                &**word_source,
                events,
            );

            for &c in typed {
                let hit_word = words.process_char(c, &mut ctx);
                let hit_wall = wall.process_wall_char(c, ctx.stats, ctx.events);
                if !hit_word && !hit_wall {
                    ctx.events.push(GameEvent::InputError { ch: c });
                }
            }

            words.tick(dt, GameState::Playing, &mut ctx);
            wall.tick(dt, GameState::Playing, words, &mut ctx);
        }

        if self.check_defeat() {
            return;
        }

        let tick = self.energy.tick(
            dt,
            self.state,
            self.run.current_level(),
            &self.stats,
            &mut self.events,
        );
        if tick == EnergyTick::Depleted {
            // Only fails outside `Playing`, which was checked above.
            if let Err(err) = self.begin_collection() {
                tracing::warn!(code = err.error_code(), %err, "collection phase not started");
            }
        }
    }

    fn tick_collecting(&mut self, dt: f32) {
        if self.collection.tick(dt, &mut self.events) == CollectionTick::Ended {
            if let Err(err) = self.end_collection() {
                tracing::warn!(code = err.error_code(), %err, "collection end rejected");
            }
        }
    }

    fn tick_autosave(&mut self, dt: f32) {
        // One save covers any number of missed intervals.
        if self.autosave_timer.advance(dt, self.config.autosave_interval) > 0 {
            self.events.push(GameEvent::AutosaveDue);
        }
    }

    /// Ends the run if hit points ran out. Returns whether it did.
    fn check_defeat(&mut self) -> bool {
        let in_run = matches!(self.state, GameState::Playing | GameState::Collecting);
        if !in_run || !self.run.is_defeated() {
            return false;
        }
        self.end_run(RunEndReason::Defeated).is_ok()
    }

    fn set_state(&mut self, to: GameState) {
        let from = self.state;
        if from == to {
            return;
        }
        self.state = to;
        self.events.push(GameEvent::StateChanged { from, to });
        tracing::info!(%from, %to, "state changed");
    }

    fn reject(&self, action: &'static str) -> TransitionError {
        TransitionError::InvalidPhase {
            action,
            state: self.state,
        }
    }

    fn finish_call(&mut self, result: Result<(), TransitionError>) -> Result<(), TransitionError> {
        if let Err(err) = &result {
            tracing::warn!(code = err.error_code(), %err, "transition rejected");
        }
        self.dispatch();
        result
    }

    /// Folds progress-relevant events into persistent state, then publishes
    /// the queue.
    fn dispatch(&mut self) {
        let total = self.config.total_levels;
        for event in self.events.iter() {
            match *event {
                GameEvent::LevelChanged { level } => {
                    self.highest_unlocked_level = self.highest_unlocked_level.max(level.min(total));
                    if level >= ProgressFlags::MILESTONE_LEVEL {
                        self.flags.insert(ProgressFlags::REACHED_LEVEL_10);
                    }
                }
                GameEvent::BossDefeated { level, .. } => {
                    if let Some(slot) = level
                        .checked_sub(1)
                        .and_then(|index| self.defeated_boss_levels.get_mut(index as usize))
                    {
                        *slot = true;
                    }
                }
                _ => {}
            }
        }
        self.bus.flush(&mut self.events);
    }
}

impl std::fmt::Debug for GameFlowController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameFlowController")
            .field("state", &self.state)
            .field("level", &self.run.current_level())
            .field("hp", &self.run.current_hp())
            .field("coins", &self.letters.coins())
            .field("bus", &self.bus)
            .finish_non_exhaustive()
    }
}
