//! Content factory for building a session from data files.

use std::path::{Path, PathBuf};

use typing_core::{GameConfig, GameFlowController, PcgRng, UpgradeGraphConfig, WordList};

use crate::loaders::{ConfigLoader, LoadResult, UpgradeLoader, WordLoader};

/// Everything a session needs from disk.
#[derive(Debug, Clone)]
pub struct GameContent {
    pub config: GameConfig,
    pub upgrades: UpgradeGraphConfig,
    pub words: WordList,
}

impl GameContent {
    /// Builds a controller in `Menu`, seeding its random source with `seed`.
    pub fn into_controller(self, seed: u64) -> LoadResult<GameFlowController> {
        let flow = GameFlowController::new(self.config, self.upgrades, self.words, PcgRng::new(seed))?;
        Ok(flow)
    }
}

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── upgrades.ron
/// └── words.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data directory bundled with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the upgrade graph from `upgrades.ron`.
    pub fn load_upgrades(&self) -> LoadResult<UpgradeGraphConfig> {
        UpgradeLoader::load(&self.data_dir.join("upgrades.ron"))
    }

    /// Load the word list from `words.ron`.
    pub fn load_words(&self) -> LoadResult<WordList> {
        WordLoader::load(&self.data_dir.join("words.ron"))
    }

    pub fn load_all(&self) -> LoadResult<GameContent> {
        let content = GameContent {
            config: self.load_config()?,
            upgrades: self.load_upgrades()?,
            words: self.load_words()?,
        };
        tracing::info!(
            dir = %self.data_dir.display(),
            upgrades = content.upgrades.len(),
            words = content.words.len(),
            "content loaded"
        );
        Ok(content)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_directory_reports_the_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let factory = ContentFactory::new(dir.path().join("nope"));
        let err = factory.load_config().unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn malformed_file_fails_to_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("words.ron"), "(words: [").expect("write");
        let factory = ContentFactory::new(dir.path());
        assert!(factory.load_words().is_err());
    }
}
