//! Content loaders for reading game data from files.
//!
//! This module provides loaders that convert RON/TOML files into the
//! validated core types a [`typing_core::GameFlowController`] is built from.

pub mod config;
pub mod factory;
pub mod upgrades;
pub mod words;

pub use config::ConfigLoader;
pub use factory::{ContentFactory, GameContent};
pub use upgrades::{UpgradeGraphFile, UpgradeLoader};
pub use words::{WordListFile, WordLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
