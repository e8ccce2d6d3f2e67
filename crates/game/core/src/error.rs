//! Common error infrastructure for typing-core.
//!
//! Domain-specific errors (`GraphError`, `PurchaseError`, `TransitionError`,
//! `ConfigError`) live next to the component they validate. This module only
//! carries the classification shared by all of them.
//!
//! Gameplay never panics on bad input: rejected operations leave state
//! untouched and report why. Data-integrity problems (a broken upgrade graph,
//! a nonsensical config) are caught once, at construction time.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The same request may succeed later (e.g. not enough coins yet).
    Recoverable,

    /// Invalid request; retrying without changes will fail again.
    Validation,

    /// Unexpected state inconsistency. Indicates a bug.
    Internal,

    /// Static content is unusable; the host must not start a session with it.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug or broken content.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all typing-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - `error_code` returns a stable snake_case identifier per variant
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
