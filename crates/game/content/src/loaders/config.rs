//! Game configuration loader.

use std::path::Path;

use typing_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate config from a TOML file.
    ///
    /// Keys missing from the file keep their defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))
    }

    /// Parse and validate config from TOML text.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            total_levels = 30

            [words]
            kills_to_warp = 5
            "#,
        )
        .expect("valid partial config");
        assert_eq!(config.total_levels, 30);
        assert_eq!(config.words.kills_to_warp, 5);
        assert_eq!(config.words.warp_text, "warp");
        assert_eq!(config.energy, GameConfig::default().energy);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = ConfigLoader::parse("[words]\nkills_to_warp = 0\n").unwrap_err();
        assert!(err.to_string().contains("kills_to_warp"));
    }

    #[test]
    fn syntax_errors_are_reported() {
        assert!(ConfigLoader::parse("total_levels = ").is_err());
    }
}
