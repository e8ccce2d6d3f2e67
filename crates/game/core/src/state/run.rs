use crate::events::{EventQueue, GameEvent};
use crate::stats::PlayerStats;

/// Result of applying damage to the run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    /// The shield took the hit and is now gone.
    Absorbed,
    /// Hit points dropped but the run goes on.
    Hit { remaining: u32 },
    /// Hit points reached zero.
    Defeated,
    /// The run was already lost; nothing changed.
    Ignored,
}

/// Per-run mutable state: hit points, level and shield.
///
/// Prestige currency lives here too but survives [`RunManager::reset`]; it
/// only ever grows, through boss defeats.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunManager {
    current_hp: u32,
    max_hp: u32,
    current_level: u32,
    shield_active: bool,
    prestige_currency: u64,
}

impl RunManager {
    pub fn new() -> Self {
        Self {
            current_hp: PlayerStats::BASE_MAX_HP,
            max_hp: PlayerStats::BASE_MAX_HP,
            current_level: 1,
            shield_active: false,
            prestige_currency: 0,
        }
    }

    /// Prepares a fresh run at `level` with hit points from `stats`.
    pub fn reset(&mut self, level: u32, stats: &PlayerStats, events: &mut EventQueue) {
        self.max_hp = stats.max_hp.max(1);
        self.current_hp = self.max_hp;
        self.current_level = level.max(1);
        self.shield_active = stats.shield;
        events.push(GameEvent::HpChanged {
            hp: self.current_hp,
            max_hp: self.max_hp,
        });
        events.push(GameEvent::LevelChanged {
            level: self.current_level,
        });
    }

    pub fn current_hp(&self) -> u32 {
        self.current_hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn current_level(&self) -> u32 {
        self.current_level
    }

    pub fn shield_active(&self) -> bool {
        self.shield_active
    }

    pub fn prestige_currency(&self) -> u64 {
        self.prestige_currency
    }

    pub fn is_defeated(&self) -> bool {
        self.current_hp == 0
    }

    pub fn take_damage(&mut self, amount: u32, events: &mut EventQueue) -> DamageOutcome {
        if amount == 0 || self.is_defeated() {
            return DamageOutcome::Ignored;
        }
        if self.shield_active {
            self.shield_active = false;
            events.push(GameEvent::ShieldBroken);
            return DamageOutcome::Absorbed;
        }

        self.current_hp = self.current_hp.saturating_sub(amount);
        events.push(GameEvent::HpChanged {
            hp: self.current_hp,
            max_hp: self.max_hp,
        });

        if self.is_defeated() {
            tracing::info!(level = self.current_level, "run defeated");
            DamageOutcome::Defeated
        } else {
            DamageOutcome::Hit {
                remaining: self.current_hp,
            }
        }
    }

    /// Moves to the next level and returns it.
    pub fn advance_level(&mut self, events: &mut EventQueue) -> u32 {
        self.current_level += 1;
        events.push(GameEvent::LevelChanged {
            level: self.current_level,
        });
        self.current_level
    }

    pub fn add_prestige(&mut self, amount: u64) {
        self.prestige_currency = self.prestige_currency.saturating_add(amount);
    }

    /// Loads the persisted prestige balance.
    pub fn restore_prestige(&mut self, amount: u64) {
        self.prestige_currency = amount;
    }
}

impl Default for RunManager {
    fn default() -> Self {
        Self::new()
    }
}
