use crate::error::{ErrorSeverity, GameError};

/// Top-level phase of the game loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum GameState {
    #[default]
    Menu,
    Playing,
    Collecting,
}

/// A phase transition that was rejected. Nothing changes when one is returned.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("cannot {action} while in {state}")]
    InvalidPhase {
        action: &'static str,
        state: GameState,
    },

    #[error("level {level} is outside 1..={total}")]
    LevelOutOfRange { level: u32, total: u32 },

    #[error("level {level} is locked (highest unlocked: {highest})")]
    LevelLocked { level: u32, highest: u32 },

    #[error("a converter session is still running")]
    ConverterActive,
}

impl GameError for TransitionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidPhase { .. } => "transition_invalid_phase",
            Self::LevelOutOfRange { .. } => "transition_level_out_of_range",
            Self::LevelLocked { .. } => "transition_level_locked",
            Self::ConverterActive => "transition_converter_active",
        }
    }
}
