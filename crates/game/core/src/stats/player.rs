//! Player stats derived from purchased upgrades.
//!
//! `PlayerStats` is never edited field by field from outside. It is rebuilt by
//! [`PlayerStats::reset_to_base`] followed by one [`PlayerStats::apply_upgrade`]
//! per owned upgrade node, so a live purchase sequence and a save restore
//! always land on the same values.

use crate::state::LetterKind;

/// Stat targeted by an upgrade node.
///
/// Values passed to [`PlayerStats::apply_upgrade`] are interpreted per stat:
/// counts are rounded, toggles are "on" when the value is positive.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum UpgradeId {
    MaxHp,
    MaxEnergy,
    DrainMultiplier,
    LettersPerKill,
    CritChance,
    AutoTypeInterval,
    AutoTypeCount,
    EnergyPerKill,
    LetterChanceB,
    LetterChanceC,
    LetterChanceD,
    LetterChanceE,
    BaseDamage,
    BossBonusDamage,
    WallRevealLevel,
    WallAutoTypeInterval,
    CollectionDuration,
    Shield,
    ConverterSpeed,
    ConverterSize,
    ConverterAutoMove,
    ConverterExtraHoles,
    CoinMultiplier,
}

/// Flat bag of every stat an upgrade can change.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerStats {
    pub max_hp: u32,
    pub max_energy: f32,
    /// Multiplies the drain interval; above 1.0 slows the drain.
    pub drain_multiplier: f32,
    pub letters_per_kill: u32,
    pub crit_chance: f32,
    /// Seconds between auto-typed characters; 0 disables auto-typing.
    pub auto_type_interval: f32,
    pub auto_type_count: u32,
    pub energy_per_kill: f32,
    /// Drop chance per letter rarity. `A` is the fallback and ignores its entry.
    pub letter_chances: [f32; LetterKind::COUNT],
    pub base_damage: u32,
    pub boss_bonus_damage: u32,
    /// Number of wall rings, from the innermost, that accept typing.
    pub wall_reveal_level: u32,
    pub wall_auto_type_interval: f32,
    pub collection_duration: f32,
    pub shield: bool,
    pub converter_speed: f32,
    pub converter_size: f32,
    pub converter_auto_move: bool,
    pub converter_extra_holes: u32,
    pub coin_multiplier: f32,
}

impl PlayerStats {
    pub const BASE_MAX_HP: u32 = 3;
    pub const BASE_MAX_ENERGY: f32 = 10.0;
    pub const BASE_ENERGY_PER_KILL: f32 = 0.5;
    pub const BASE_LETTER_CHANCES: [f32; LetterKind::COUNT] = [1.0, 0.15, 0.05, 0.01, 0.0];
    pub const BASE_COLLECTION_DURATION: f32 = 5.0;

    pub fn base() -> Self {
        Self {
            max_hp: Self::BASE_MAX_HP,
            max_energy: Self::BASE_MAX_ENERGY,
            drain_multiplier: 1.0,
            letters_per_kill: 1,
            crit_chance: 0.0,
            auto_type_interval: 0.0,
            auto_type_count: 1,
            energy_per_kill: Self::BASE_ENERGY_PER_KILL,
            letter_chances: Self::BASE_LETTER_CHANCES,
            base_damage: 1,
            boss_bonus_damage: 0,
            wall_reveal_level: 0,
            wall_auto_type_interval: 0.0,
            collection_duration: Self::BASE_COLLECTION_DURATION,
            shield: false,
            converter_speed: 1.0,
            converter_size: 1.0,
            converter_auto_move: false,
            converter_extra_holes: 0,
            coin_multiplier: 1.0,
        }
    }

    pub fn reset_to_base(&mut self) {
        *self = Self::base();
    }

    /// Sets the stat behind `id` to `value`.
    ///
    /// Values are absolute (looked up per level), never accumulated.
    pub fn apply_upgrade(&mut self, id: UpgradeId, value: f32) {
        let count = value.round().max(0.0) as u32;
        let enabled = value > 0.0;
        match id {
            UpgradeId::MaxHp => self.max_hp = count.max(1),
            UpgradeId::MaxEnergy => self.max_energy = value.max(0.0),
            UpgradeId::DrainMultiplier => self.drain_multiplier = value.max(0.0),
            UpgradeId::LettersPerKill => self.letters_per_kill = count,
            UpgradeId::CritChance => self.crit_chance = value.clamp(0.0, 1.0),
            UpgradeId::AutoTypeInterval => self.auto_type_interval = value.max(0.0),
            UpgradeId::AutoTypeCount => self.auto_type_count = count,
            UpgradeId::EnergyPerKill => self.energy_per_kill = value.max(0.0),
            UpgradeId::LetterChanceB => self.set_letter_chance(LetterKind::B, value),
            UpgradeId::LetterChanceC => self.set_letter_chance(LetterKind::C, value),
            UpgradeId::LetterChanceD => self.set_letter_chance(LetterKind::D, value),
            UpgradeId::LetterChanceE => self.set_letter_chance(LetterKind::E, value),
            UpgradeId::BaseDamage => self.base_damage = count.max(1),
            UpgradeId::BossBonusDamage => self.boss_bonus_damage = count,
            UpgradeId::WallRevealLevel => self.wall_reveal_level = count,
            UpgradeId::WallAutoTypeInterval => self.wall_auto_type_interval = value.max(0.0),
            UpgradeId::CollectionDuration => self.collection_duration = value.max(0.0),
            UpgradeId::Shield => self.shield = enabled,
            UpgradeId::ConverterSpeed => self.converter_speed = value.max(0.0),
            UpgradeId::ConverterSize => self.converter_size = value.max(0.0),
            UpgradeId::ConverterAutoMove => self.converter_auto_move = enabled,
            UpgradeId::ConverterExtraHoles => self.converter_extra_holes = count,
            UpgradeId::CoinMultiplier => self.coin_multiplier = value.max(0.0),
        }
    }

    pub fn letter_chance(&self, kind: LetterKind) -> f32 {
        self.letter_chances[kind.index()]
    }

    /// Whether ring `ring` (0 = innermost) currently accepts wall input.
    pub fn is_ring_revealed(&self, ring: usize) -> bool {
        ring < self.wall_reveal_level as usize
    }

    fn set_letter_chance(&mut self, kind: LetterKind, value: f32) {
        self.letter_chances[kind.index()] = value.clamp(0.0, 1.0);
    }
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self::base()
    }
}
