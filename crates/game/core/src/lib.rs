//! Deterministic simulation core for the typing defense game.
//!
//! `typing-core` holds the rules: word combat, the breakable wall, energy and
//! the collection phase, the upgrade graph, and the letter economy. It has no
//! rendering, input polling or file I/O. A host drives
//! [`flow::GameFlowController`] once per frame and listens to the
//! [`events::GameEvent`]s it publishes. Randomness comes from an injected
//! [`env::RandomSource`], so a seeded session replays exactly.
pub mod combat;
pub mod config;
pub mod converter;
pub mod env;
pub mod error;
pub mod events;
pub mod flow;
pub mod save;
pub mod state;
pub mod stats;
mod timer;
pub mod upgrade;
pub mod wall;

pub use combat::{CombatContext, WordManager};
pub use config::{
    CollectionConfig, ConfigError, ConverterConfig, EnergyConfig, GameConfig, RingLayout,
    WallConfig, WordConfig,
};
pub use converter::{ConverterInput, ConverterManager, Vec2};
pub use env::{PcgRng, RandomSource, WordList, WordSource};
pub use error::{ErrorSeverity, GameError};
pub use events::{EventBus, EventQueue, GameEvent, RunEndReason, SubscriptionId, Topic};
pub use flow::{
    CollectionPhaseController, GameFlowController, GameState, ProgressFlags, TransitionError,
};
pub use save::SaveData;
pub use state::{
    DamageOutcome, DefenseWord, EnergyTracker, LetterKind, LetterTracker, RunManager, WordId,
    WordKind,
};
pub use stats::{PlayerStats, UpgradeId};
pub use upgrade::{
    GraphError, NodeId, PurchaseError, UpgradeEntry, UpgradeGraphConfig, UpgradeNode,
    UpgradeTracker,
};
pub use wall::{ArenaBounds, SideOrigin, WallManager, WallSegmentId, WallTracker};
