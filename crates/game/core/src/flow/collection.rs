//! Timed post-depletion phase.
//!
//! On entry gameplay time freezes for a fixed charge sequence. A hold
//! predicate (or the one-time tutorial) can stretch the freeze. After the
//! release, time runs in slow motion until the phase timer, counted in
//! unscaled time, runs out.

use std::fmt;

use crate::config::CollectionConfig;
use crate::events::{EventQueue, GameEvent};
use crate::state::{DamageOutcome, RunManager};

/// Returned by [`CollectionPhaseController::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectionTick {
    Inactive,
    Frozen,
    Running,
    /// The timer ran out during this tick. Reported once.
    Ended,
}

type HoldPredicate = Box<dyn Fn() -> bool>;

pub struct CollectionPhaseController {
    config: CollectionConfig,
    active: bool,
    frozen: bool,
    remaining: f32,
    charge_remaining: f32,
    time_scale: f32,
    tutorial_hold: bool,
    hold: Option<HoldPredicate>,
}

impl CollectionPhaseController {
    pub fn new(config: CollectionConfig) -> Self {
        Self {
            config,
            active: false,
            frozen: false,
            remaining: 0.0,
            charge_remaining: 0.0,
            time_scale: 1.0,
            tutorial_hold: false,
            hold: None,
        }
    }

    /// Freezes time and starts the charge sequence.
    pub fn start(&mut self, duration: f32, tutorial_hold: bool, events: &mut EventQueue) {
        self.active = true;
        self.frozen = true;
        self.remaining = duration.max(0.0);
        self.charge_remaining = self.config.charge_duration;
        self.time_scale = 0.0;
        self.tutorial_hold = tutorial_hold;
        events.push(GameEvent::CollectionStarted {
            duration: self.remaining,
        });
    }

    /// Registers a predicate that keeps time frozen while it returns `true`.
    pub fn set_hold_predicate(&mut self, hold: impl Fn() -> bool + 'static) {
        self.hold = Some(Box::new(hold));
    }

    pub fn clear_hold_predicate(&mut self) {
        self.hold = None;
    }

    pub fn release_tutorial_hold(&mut self) {
        self.tutorial_hold = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_frozen(&self) -> bool {
        self.active && self.frozen
    }

    /// Multiplier for gameplay time: 0 while frozen, slow motion afterwards,
    /// 1 outside the phase.
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Advances by `unscaled_dt` real seconds.
    pub fn tick(&mut self, unscaled_dt: f32, events: &mut EventQueue) -> CollectionTick {
        if !self.active {
            return CollectionTick::Inactive;
        }
        let dt = unscaled_dt.max(0.0);

        if self.frozen {
            self.charge_remaining = (self.charge_remaining - dt).max(0.0);
            if self.charge_remaining > 0.0 || self.is_held() {
                return CollectionTick::Frozen;
            }
            self.frozen = false;
            self.time_scale = self.config.slow_motion_scale;
            events.push(GameEvent::ChargeReleased);
            return CollectionTick::Running;
        }

        self.remaining -= dt;
        if self.remaining > 0.0 {
            return CollectionTick::Running;
        }
        self.finish();
        events.push(GameEvent::CollectionEnded);
        CollectionTick::Ended
    }

    /// A collectible word reached the player's attractor: one point of run
    /// damage. Ignored outside the phase.
    pub fn handle_word_hit_black_hole(
        &mut self,
        run: &mut RunManager,
        events: &mut EventQueue,
    ) -> DamageOutcome {
        if !self.active {
            return DamageOutcome::Ignored;
        }
        run.take_damage(1, events)
    }

    /// Ends the phase immediately and restores real time.
    pub fn force_end(&mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        self.active = false;
        self.frozen = false;
        self.remaining = 0.0;
        self.charge_remaining = 0.0;
        self.time_scale = 1.0;
        self.tutorial_hold = false;
    }

    fn is_held(&self) -> bool {
        self.tutorial_hold || self.hold.as_ref().is_some_and(|hold| hold())
    }
}

impl fmt::Debug for CollectionPhaseController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionPhaseController")
            .field("active", &self.active)
            .field("frozen", &self.frozen)
            .field("remaining", &self.remaining)
            .field("time_scale", &self.time_scale)
            .field("tutorial_hold", &self.tutorial_hold)
            .field("has_hold", &self.hold.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::stats::PlayerStats;

    fn controller() -> CollectionPhaseController {
        CollectionPhaseController::new(CollectionConfig {
            charge_duration: 1.0,
            slow_motion_scale: 0.5,
        })
    }

    #[test]
    fn charge_then_slow_motion_then_end() {
        let mut phase = controller();
        let mut events = EventQueue::new();
        phase.start(2.0, false, &mut events);
        assert_eq!(phase.time_scale(), 0.0);

        assert_eq!(phase.tick(0.5, &mut events), CollectionTick::Frozen);
        // Frozen time does not count toward the phase timer.
        assert_eq!(phase.remaining(), 2.0);
        assert_eq!(phase.tick(0.5, &mut events), CollectionTick::Running);
        assert_eq!(phase.time_scale(), 0.5);

        assert_eq!(phase.tick(1.5, &mut events), CollectionTick::Running);
        assert_eq!(phase.tick(0.5, &mut events), CollectionTick::Ended);
        assert_eq!(phase.time_scale(), 1.0);
        assert_eq!(phase.tick(1.0, &mut events), CollectionTick::Inactive);

        let ended = events
            .iter()
            .filter(|e| matches!(e, GameEvent::CollectionEnded))
            .count();
        assert_eq!(ended, 1);
    }

    #[test]
    fn hold_predicate_extends_freeze() {
        let mut phase = controller();
        let mut events = EventQueue::new();
        let held = Rc::new(Cell::new(true));
        let flag = Rc::clone(&held);
        phase.set_hold_predicate(move || flag.get());
        phase.start(1.0, false, &mut events);

        for _ in 0..10 {
            assert_eq!(phase.tick(1.0, &mut events), CollectionTick::Frozen);
        }
        held.set(false);
        assert_eq!(phase.tick(0.0, &mut events), CollectionTick::Running);
    }

    #[test]
    fn cleared_hold_predicate_no_longer_blocks() {
        let mut phase = controller();
        let mut events = EventQueue::new();
        phase.set_hold_predicate(|| true);
        phase.start(1.0, false, &mut events);
        assert_eq!(phase.tick(5.0, &mut events), CollectionTick::Frozen);

        phase.clear_hold_predicate();
        assert_eq!(phase.tick(0.0, &mut events), CollectionTick::Running);
    }

    #[test]
    fn tutorial_hold_waits_for_release() {
        let mut phase = controller();
        let mut events = EventQueue::new();
        phase.start(1.0, true, &mut events);
        assert_eq!(phase.tick(5.0, &mut events), CollectionTick::Frozen);
        phase.release_tutorial_hold();
        assert_eq!(phase.tick(0.0, &mut events), CollectionTick::Running);
    }

    #[test]
    fn force_end_restores_real_time() {
        let mut phase = controller();
        let mut events = EventQueue::new();
        phase.start(3.0, true, &mut events);
        phase.force_end();
        assert!(!phase.is_active());
        assert_eq!(phase.time_scale(), 1.0);
    }

    #[test]
    fn black_hole_hits_only_hurt_during_phase() {
        let mut phase = controller();
        let mut events = EventQueue::new();
        let mut run = RunManager::new();
        run.reset(1, &PlayerStats::base(), &mut events);

        assert_eq!(
            phase.handle_word_hit_black_hole(&mut run, &mut events),
            DamageOutcome::Ignored
        );
        phase.start(1.0, false, &mut events);
        phase.handle_word_hit_black_hole(&mut run, &mut events);
        assert_eq!(run.current_hp(), PlayerStats::BASE_MAX_HP - 1);
    }
}
