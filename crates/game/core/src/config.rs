//! Game configuration constants and tunable parameters.
//!
//! Every subsystem reads its tunables from one of the structs below. All of
//! them implement `Default` and deserialize with `serde(default)`, so a TOML
//! file only needs to list the values it overrides.

use crate::error::{ErrorSeverity, GameError};
use crate::state::LetterKind;

/// Errors reported by [`GameConfig::validate`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} must be at least 1")]
    Zero { field: &'static str },

    #[error("wall layout must contain at least one ring")]
    EmptyWallLayout,

    #[error("ring {ring} must have at least one segment per side")]
    EmptyRing { ring: usize },

    #[error("boss level {boss_level} exceeds total levels {total_levels}")]
    BossLevelOutOfRange { boss_level: u32, total_levels: u32 },

    #[error("time scale {0} must be within (0, 1]")]
    InvalidTimeScale(f32),

    #[error("word length range {min}..={max} is empty")]
    InvalidLengthRange { min: usize, max: usize },
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositive { .. } => "config_non_positive",
            Self::Zero { .. } => "config_zero",
            Self::EmptyWallLayout => "config_empty_wall",
            Self::EmptyRing { .. } => "config_empty_ring",
            Self::BossLevelOutOfRange { .. } => "config_boss_level",
            Self::InvalidTimeScale(_) => "config_time_scale",
            Self::InvalidLengthRange { .. } => "config_length_range",
        }
    }
}

/// Spawn, warp and boss tunables for [`crate::combat::WordManager`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WordConfig {
    pub base_spawn_interval: f32,
    pub spawn_scale_per_level: f32,
    pub min_spawn_interval: f32,
    pub max_active_words: usize,
    pub kills_to_warp: u32,
    pub warp_text: String,
    pub boss_level: u32,
    pub boss_hp: u32,
    pub boss_min_length: usize,
    pub boss_max_length: usize,
    /// Energy granted every time the boss word is completed.
    pub boss_hit_energy: f32,
    pub boss_prestige_reward: u64,
    pub base_word_length: usize,
    /// Levels needed before the shortest spawned word grows by one letter.
    pub levels_per_length_step: u32,
    pub length_spread: usize,
    pub max_word_length: usize,
}

impl WordConfig {
    /// Word length range `(min, max)` inclusive for the given level.
    pub fn length_range(&self, level: u32) -> (usize, usize) {
        let steps = (level.saturating_sub(1) / self.levels_per_length_step.max(1)) as usize;
        let min = (self.base_word_length + steps).min(self.max_word_length);
        let max = (min + self.length_spread).min(self.max_word_length);
        (min, max)
    }

    /// Hit points of a regular word spawned at `level`.
    pub fn word_hp(level: u32) -> u32 {
        ((level + 1) / 2).max(1)
    }

    /// Seconds between spawns at `level`.
    pub fn spawn_interval(&self, level: u32) -> f32 {
        (self.base_spawn_interval - level as f32 * self.spawn_scale_per_level)
            .max(self.min_spawn_interval)
    }
}

impl Default for WordConfig {
    fn default() -> Self {
        Self {
            base_spawn_interval: 2.5,
            spawn_scale_per_level: 0.15,
            min_spawn_interval: 0.5,
            max_active_words: 12,
            kills_to_warp: 20,
            warp_text: "warp".to_string(),
            boss_level: 10,
            boss_hp: 5,
            boss_min_length: 7,
            boss_max_length: 10,
            boss_hit_energy: 2.0,
            boss_prestige_reward: 1,
            base_word_length: 3,
            levels_per_length_step: 3,
            length_spread: 2,
            max_word_length: 10,
        }
    }
}

/// Drain tunables for [`crate::state::EnergyTracker`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnergyConfig {
    /// Seconds per unit of energy at level 1 with no upgrades.
    pub base_drain_interval: f32,
    pub drain_scale_per_level: f32,
    pub min_drain_interval: f32,
}

impl EnergyConfig {
    /// Effective seconds per unit of energy.
    pub fn drain_interval(&self, level: u32, drain_multiplier: f32) -> f32 {
        let level_factor = 1.0 - level.saturating_sub(1) as f32 * self.drain_scale_per_level;
        (self.base_drain_interval * level_factor * drain_multiplier).max(self.min_drain_interval)
    }
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            base_drain_interval: 1.0,
            drain_scale_per_level: 0.05,
            min_drain_interval: 0.5,
        }
    }
}

/// Shape of one concentric wall ring.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RingLayout {
    pub segments_per_side: usize,
    /// Distance from the arena center to this ring's sides, in world units.
    pub half_extent: f32,
}

impl RingLayout {
    pub const fn new(segments_per_side: usize, half_extent: f32) -> Self {
        Self {
            segments_per_side,
            half_extent,
        }
    }
}

/// Wall layout and blue word tunables.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WallConfig {
    pub rings: Vec<RingLayout>,
    /// Wall word length on ring 0; each outer ring adds one letter.
    pub base_word_length: usize,
    pub blue_word_interval: f32,
    pub blue_word_coin_reward: u64,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            rings: vec![
                RingLayout::new(3, 6.0),
                RingLayout::new(4, 9.0),
                RingLayout::new(5, 12.0),
            ],
            base_word_length: 4,
            blue_word_interval: 8.0,
            blue_word_coin_reward: 5,
        }
    }
}

/// Timing of the post-depletion collection phase.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CollectionConfig {
    pub charge_duration: f32,
    pub slow_motion_scale: f32,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            charge_duration: 1.2,
            slow_motion_scale: 0.35,
        }
    }
}

/// Geometry and economy of the letter converter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConverterConfig {
    pub arena_radius: f32,
    pub scatter_radius: f32,
    pub hole_speed: f32,
    /// Fraction of `hole_speed` used by holes seeking letters on their own.
    pub auto_speed_fraction: f32,
    pub collect_radius: f32,
    /// Suction radius as a multiple of the collect radius.
    pub suction_multiplier: f32,
    pub suction_speed: f32,
    pub auto_hole_ring_radius: f32,
    pub letter_values: [u64; LetterKind::COUNT],
}

impl ConverterConfig {
    pub fn letter_value(&self, kind: LetterKind) -> u64 {
        self.letter_values[kind.index()]
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            arena_radius: 10.0,
            scatter_radius: 4.0,
            hole_speed: 5.0,
            auto_speed_fraction: 0.6,
            collect_radius: 0.5,
            suction_multiplier: 3.0,
            suction_speed: 4.0,
            auto_hole_ring_radius: 6.0,
            letter_values: [1, 3, 8, 20, 50],
        }
    }
}

/// Root configuration shared by every subsystem.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub total_levels: u32,
    pub autosave_interval: f32,
    /// Extra margin added around spawn bounds to get camera bounds.
    pub camera_padding: f32,
    pub words: WordConfig,
    pub energy: EnergyConfig,
    pub wall: WallConfig,
    pub collection: CollectionConfig,
    pub converter: ConverterConfig,
}

impl GameConfig {
    pub const DEFAULT_TOTAL_LEVELS: u32 = 20;
    pub const DEFAULT_AUTOSAVE_INTERVAL: f32 = 5.0;

    pub fn new() -> Self {
        Self {
            total_levels: Self::DEFAULT_TOTAL_LEVELS,
            autosave_interval: Self::DEFAULT_AUTOSAVE_INTERVAL,
            camera_padding: 1.5,
            words: WordConfig::default(),
            energy: EnergyConfig::default(),
            wall: WallConfig::default(),
            collection: CollectionConfig::default(),
            converter: ConverterConfig::default(),
        }
    }

    /// Checks every tunable once, before a session is built on top of it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::NonPositive { field, value })
            }
        }

        if self.total_levels == 0 {
            return Err(ConfigError::Zero {
                field: "total_levels",
            });
        }
        positive("autosave_interval", self.autosave_interval)?;

        let words = &self.words;
        positive("words.base_spawn_interval", words.base_spawn_interval)?;
        positive("words.min_spawn_interval", words.min_spawn_interval)?;
        if words.kills_to_warp == 0 {
            return Err(ConfigError::Zero {
                field: "words.kills_to_warp",
            });
        }
        if words.max_active_words == 0 {
            return Err(ConfigError::Zero {
                field: "words.max_active_words",
            });
        }
        if words.boss_hp == 0 {
            return Err(ConfigError::Zero {
                field: "words.boss_hp",
            });
        }
        if words.warp_text.is_empty() {
            return Err(ConfigError::Zero {
                field: "words.warp_text",
            });
        }
        if words.boss_level == 0 || words.boss_level > self.total_levels {
            return Err(ConfigError::BossLevelOutOfRange {
                boss_level: words.boss_level,
                total_levels: self.total_levels,
            });
        }
        if words.base_word_length == 0 || words.base_word_length > words.max_word_length {
            return Err(ConfigError::InvalidLengthRange {
                min: words.base_word_length,
                max: words.max_word_length,
            });
        }
        if words.boss_min_length == 0 || words.boss_min_length > words.boss_max_length {
            return Err(ConfigError::InvalidLengthRange {
                min: words.boss_min_length,
                max: words.boss_max_length,
            });
        }

        positive("energy.base_drain_interval", self.energy.base_drain_interval)?;
        positive("energy.min_drain_interval", self.energy.min_drain_interval)?;

        if self.wall.rings.is_empty() {
            return Err(ConfigError::EmptyWallLayout);
        }
        if let Some(ring) = self
            .wall
            .rings
            .iter()
            .position(|layout| layout.segments_per_side == 0)
        {
            return Err(ConfigError::EmptyRing { ring });
        }
        if self.wall.base_word_length == 0 {
            return Err(ConfigError::Zero {
                field: "wall.base_word_length",
            });
        }
        positive("wall.blue_word_interval", self.wall.blue_word_interval)?;

        positive("collection.charge_duration", self.collection.charge_duration)?;
        let scale = self.collection.slow_motion_scale;
        if !(scale > 0.0 && scale <= 1.0) {
            return Err(ConfigError::InvalidTimeScale(scale));
        }

        positive("converter.arena_radius", self.converter.arena_radius)?;
        positive("converter.collect_radius", self.converter.collect_radius)?;
        positive("converter.hole_speed", self.converter.hole_speed)?;

        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn spawn_interval_scales_down_to_floor() {
        let words = WordConfig::default();
        // 2.5 - 1 * 0.15
        assert!((words.spawn_interval(1) - 2.35).abs() < 1e-5);
        assert_eq!(words.spawn_interval(100), 0.5);
    }

    #[test]
    fn word_hp_follows_level() {
        assert_eq!(WordConfig::word_hp(1), 1);
        assert_eq!(WordConfig::word_hp(2), 1);
        assert_eq!(WordConfig::word_hp(3), 2);
        assert_eq!(WordConfig::word_hp(10), 5);
    }

    #[test]
    fn length_range_grows_with_level() {
        let words = WordConfig::default();
        assert_eq!(words.length_range(1), (3, 5));
        assert_eq!(words.length_range(4), (4, 6));
        assert_eq!(words.length_range(100), (10, 10));
    }

    #[test]
    fn drain_interval_has_floor() {
        let energy = EnergyConfig::default();
        assert_eq!(energy.drain_interval(1, 1.0), 1.0);
        // 1.0 * (1 - 9 * 0.05) = 0.55
        assert!((energy.drain_interval(10, 1.0) - 0.55).abs() < 1e-5);
        assert_eq!(energy.drain_interval(20, 1.0), 0.5);
        assert_eq!(energy.drain_interval(1, 2.0), 2.0);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = GameConfig::default();
        config.words.kills_to_warp = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Zero { .. })));

        let mut config = GameConfig::default();
        config.words.boss_level = 50;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BossLevelOutOfRange { .. })
        ));

        let mut config = GameConfig::default();
        config.wall.rings.clear();
        assert_eq!(config.validate(), Err(ConfigError::EmptyWallLayout));

        let mut config = GameConfig::default();
        config.collection.slow_motion_scale = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidTimeScale(0.0)));
    }
}
