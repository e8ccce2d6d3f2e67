//! Letter-to-coin conversion loop.
//!
//! Letters are scattered as loose pickups; black holes sweep them up. A hole
//! converts a letter once it is inside the collect radius and merely pulls it
//! while it is inside the wider suction radius.

use std::f32::consts::TAU;

use super::geometry::Vec2;
use crate::config::ConverterConfig;
use crate::env::RandomSource;
use crate::events::{EventQueue, GameEvent};
use crate::state::{LetterKind, LetterTracker};
use crate::stats::PlayerStats;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LooseLetter {
    pub kind: LetterKind,
    pub position: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlackHole {
    pub position: Vec2,
    pub player_controlled: bool,
}

/// Player steering for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ConverterInput {
    /// Keyboard direction; longer than one is clamped.
    pub direction: Vec2,
    /// Held pointer position; overrides `direction` while present.
    pub pointer: Option<Vec2>,
}

#[derive(Clone, Debug)]
pub struct ConverterManager {
    config: ConverterConfig,
    active: bool,
    letters: Vec<LooseLetter>,
    holes: Vec<BlackHole>,
    coins_earned: u64,
}

impl ConverterManager {
    pub fn new(config: ConverterConfig) -> Self {
        Self {
            config,
            active: false,
            letters: Vec::new(),
            holes: Vec::new(),
            coins_earned: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn letters(&self) -> &[LooseLetter] {
        &self.letters
    }

    pub fn holes(&self) -> &[BlackHole] {
        &self.holes
    }

    /// Coins earned since the current session started.
    pub fn coins_earned(&self) -> u64 {
        self.coins_earned
    }

    /// Moves the whole letter inventory into the arena and places the holes.
    ///
    /// Returns `false` (and changes nothing) when already converting or the
    /// inventory is empty.
    pub fn start_converting(
        &mut self,
        inventory: &mut LetterTracker,
        stats: &PlayerStats,
        rng: &mut dyn RandomSource,
        events: &mut EventQueue,
    ) -> bool {
        if self.active || inventory.total_letters() == 0 {
            return false;
        }

        let counts = inventory.take_all_letters();
        self.letters.clear();
        for kind in LetterKind::ALL {
            for _ in 0..counts[kind.index()] {
                let angle = rng.next_f32() * TAU;
                let radius = self.config.scatter_radius * rng.next_f32().sqrt();
                self.letters.push(LooseLetter {
                    kind,
                    position: Vec2::from_angle(angle) * radius,
                });
            }
        }

        self.holes.clear();
        self.holes.push(BlackHole {
            position: Vec2::ZERO,
            player_controlled: true,
        });
        let extra = stats.converter_extra_holes as usize;
        for i in 0..extra {
            let angle = i as f32 / extra as f32 * TAU;
            self.holes.push(BlackHole {
                position: Vec2::from_angle(angle) * self.config.auto_hole_ring_radius,
                player_controlled: false,
            });
        }

        self.active = true;
        self.coins_earned = 0;
        events.push(GameEvent::ConvertingStarted {
            letters: self.letters.len(),
            holes: self.holes.len(),
        });
        tracing::debug!(
            letters = self.letters.len(),
            holes = self.holes.len(),
            "converting started"
        );
        true
    }

    pub fn tick(
        &mut self,
        dt: f32,
        input: &ConverterInput,
        stats: &PlayerStats,
        inventory: &mut LetterTracker,
        events: &mut EventQueue,
    ) {
        if !self.active || dt <= 0.0 {
            return;
        }

        let speed = self.config.hole_speed * stats.converter_speed;
        let auto_step = speed * self.config.auto_speed_fraction * dt;
        let collect_radius = self.config.collect_radius * stats.converter_size;
        let suction_radius = collect_radius * self.config.suction_multiplier;

        for index in 0..self.holes.len() {
            let hole = self.holes[index];
            let next = if hole.player_controlled {
                match steering(hole.position, input) {
                    Some(direction) => hole.position + direction * (speed * dt),
                    None if stats.converter_auto_move => self.seek(hole.position, auto_step),
                    None => hole.position,
                }
            } else {
                self.seek(hole.position, auto_step)
            };
            self.holes[index].position = next.clamp_length(self.config.arena_radius);
        }

        let mut remaining = Vec::with_capacity(self.letters.len());
        for mut letter in std::mem::take(&mut self.letters) {
            let Some((hole, distance)) = self.nearest_hole(letter.position) else {
                remaining.push(letter);
                continue;
            };
            if distance <= collect_radius {
                let coins = self.convert(letter.kind, stats);
                inventory.add_coins(coins, events);
                events.push(GameEvent::LetterCollected {
                    kind: letter.kind,
                    coins,
                });
                continue;
            }
            if distance <= suction_radius {
                letter.position = letter
                    .position
                    .move_towards(hole, self.config.suction_speed * dt);
            }
            remaining.push(letter);
        }
        self.letters = remaining;
    }

    /// Ends the session, returning uncollected letters to the inventory.
    /// Returns how many were returned.
    pub fn finish_converting(&mut self, inventory: &mut LetterTracker, events: &mut EventQueue) -> usize {
        if !self.active {
            return 0;
        }
        let returned = self.letters.len();
        for letter in self.letters.drain(..) {
            inventory.return_letters(letter.kind, 1);
        }
        self.holes.clear();
        self.active = false;
        events.push(GameEvent::ConvertingFinished { returned });
        tracing::debug!(returned, coins = self.coins_earned, "converting finished");
        returned
    }

    fn convert(&mut self, kind: LetterKind, stats: &PlayerStats) -> u64 {
        let coins = (self.config.letter_value(kind) as f32 * stats.coin_multiplier).round() as u64;
        self.coins_earned = self.coins_earned.saturating_add(coins);
        coins
    }

    /// Position after stepping toward the nearest letter.
    fn seek(&self, from: Vec2, step: f32) -> Vec2 {
        self.letters
            .iter()
            .map(|letter| letter.position)
            .min_by(|a, b| from.distance(*a).total_cmp(&from.distance(*b)))
            .map_or(from, |target| from.move_towards(target, step))
    }

    fn nearest_hole(&self, position: Vec2) -> Option<(Vec2, f32)> {
        self.holes
            .iter()
            .map(|hole| (hole.position, hole.position.distance(position)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}

/// Direction the player is steering, if any.
fn steering(from: Vec2, input: &ConverterInput) -> Option<Vec2> {
    let direction = match input.pointer {
        Some(target) => (target - from).normalized(),
        None => input.direction.clamp_length(1.0),
    };
    (direction != Vec2::ZERO).then_some(direction)
}
