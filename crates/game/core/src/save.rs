//! Persisted progress.
//!
//! Only the data shape lives here. Reading and writing bytes is up to the
//! host; [`SaveData::to_json`] and [`SaveData::from_json`] cover the common
//! case.

use crate::flow::ProgressFlags;
use crate::state::LetterKind;
use crate::upgrade::UpgradeEntry;

/// Everything that survives between sessions.
///
/// Missing fields take their defaults, so saves written by older builds
/// still load.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase", default))]
pub struct SaveData {
    pub letters: [u64; LetterKind::COUNT],
    pub coins: u64,
    pub upgrades: Vec<UpgradeEntry>,
    pub has_completed_first_run: bool,
    pub has_reached_level10: bool,
    pub has_seen_collection_tutorial: bool,
    pub prestige_currency: u64,
    pub highest_unlocked_level: u32,
    pub defeated_boss_levels: Vec<bool>,
}

impl SaveData {
    pub fn flags(&self) -> ProgressFlags {
        ProgressFlags::from_save(
            self.has_completed_first_run,
            self.has_reached_level10,
            self.has_seen_collection_tutorial,
        )
    }

    pub fn set_flags(&mut self, flags: ProgressFlags) {
        self.has_completed_first_run = flags.contains(ProgressFlags::COMPLETED_FIRST_RUN);
        self.has_reached_level10 = flags.contains(ProgressFlags::REACHED_LEVEL_10);
        self.has_seen_collection_tutorial =
            flags.contains(ProgressFlags::SEEN_COLLECTION_TUTORIAL);
    }

    /// Boss defeat flags resized to `total_levels`: short arrays are padded
    /// with `false`, long ones truncated.
    pub fn defeated_boss_levels_for(&self, total_levels: u32) -> Vec<bool> {
        let mut levels = self.defeated_boss_levels.clone();
        levels.resize(total_levels as usize, false);
        levels
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            letters: [0; LetterKind::COUNT],
            coins: 0,
            upgrades: Vec::new(),
            has_completed_first_run: false,
            has_reached_level10: false,
            has_seen_collection_tutorial: false,
            prestige_currency: 0,
            highest_unlocked_level: 1,
            defeated_boss_levels: Vec::new(),
        }
    }
}
