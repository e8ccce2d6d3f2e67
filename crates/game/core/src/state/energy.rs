use crate::config::EnergyConfig;
use crate::events::{EventQueue, GameEvent};
use crate::flow::GameState;
use crate::stats::PlayerStats;

/// Energy within this distance of zero counts as empty.
const EMPTY_EPSILON: f32 = 1e-4;

/// Outcome of one [`EnergyTracker::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnergyTick {
    /// Not in `Playing`; nothing drained.
    Inactive,
    Draining,
    /// Energy hit zero during this tick. Reported once per run.
    Depleted,
}

/// Energy resource drained over time during play.
///
/// `current` always stays within `[0, max]`.
#[derive(Clone, Debug, PartialEq)]
pub struct EnergyTracker {
    config: EnergyConfig,
    current: f32,
    max: f32,
    depleted: bool,
}

impl EnergyTracker {
    pub fn new(config: EnergyConfig) -> Self {
        Self {
            config,
            current: PlayerStats::BASE_MAX_ENERGY,
            max: PlayerStats::BASE_MAX_ENERGY,
            depleted: false,
        }
    }

    /// Refills to the maximum from `stats` for a new run.
    pub fn reset(&mut self, stats: &PlayerStats, events: &mut EventQueue) {
        self.max = stats.max_energy.max(0.0);
        self.current = self.max;
        self.depleted = false;
        self.emit_changed(events);
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn is_depleted(&self) -> bool {
        self.depleted
    }

    /// Seconds per unit of energy for this level and stat set.
    pub fn drain_interval(&self, level: u32, stats: &PlayerStats) -> f32 {
        self.config.drain_interval(level, stats.drain_multiplier)
    }

    /// Drains `dt` seconds of energy. The caller starts the collection phase
    /// when this returns [`EnergyTick::Depleted`].
    pub fn tick(
        &mut self,
        dt: f32,
        phase: GameState,
        level: u32,
        stats: &PlayerStats,
        events: &mut EventQueue,
    ) -> EnergyTick {
        if phase != GameState::Playing || self.depleted {
            return EnergyTick::Inactive;
        }
        if dt <= 0.0 {
            return EnergyTick::Draining;
        }

        let interval = self.drain_interval(level, stats);
        self.current = (self.current - dt / interval).clamp(0.0, self.max);
        if self.current <= EMPTY_EPSILON {
            self.current = 0.0;
        }
        self.emit_changed(events);

        if self.current == 0.0 {
            self.depleted = true;
            events.push(GameEvent::EnergyDepleted);
            tracing::info!(level, "energy depleted");
            EnergyTick::Depleted
        } else {
            EnergyTick::Draining
        }
    }

    /// Adds energy, clamped at the maximum. Non-positive amounts are ignored.
    pub fn add_energy(&mut self, amount: f32, events: &mut EventQueue) {
        if amount <= 0.0 || amount.is_nan() {
            return;
        }
        self.current = (self.current + amount).min(self.max);
        self.emit_changed(events);
    }

    fn emit_changed(&self, events: &mut EventQueue) {
        events.push(GameEvent::EnergyChanged {
            energy: self.current,
            max_energy: self.max,
        });
    }
}
