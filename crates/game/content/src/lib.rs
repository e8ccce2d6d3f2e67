//! Data-driven content and loaders.
//!
//! This crate provides loaders for the RON/TOML data files a session is built
//! from:
//! - Game configuration (TOML)
//! - Upgrade graph (RON)
//! - Word list (RON)
//!
//! The bundled `data/` directory holds the default content. All loaders
//! deserialize straight into typing-core types and run core validation, so a
//! bad file fails at load time rather than mid-run.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, GameContent, LoadResult, UpgradeLoader, WordLoader,
};
