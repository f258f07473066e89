//! Common error infrastructure for crawl-core.
//!
//! Domain-specific errors (`MoveError`, `AttackError`, ...) live next to the
//! actions they validate. This module provides the classification every one of
//! them implements so hosts can decide how to surface a failure.
//!
//! Validation failures (a wall in the way, nothing to pick up) are ordinary
//! gameplay: the host shows a notice and the turn is not spent. Internal
//! failures mean the core was driven into a state its own invariants rule out.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The same intent may succeed later or with a different choice.
    ///
    /// Examples: destination blocked, target out of range, inventory full
    Recoverable,

    /// The request itself is malformed and must not be retried unchanged.
    ///
    /// Examples: unknown inventory slot, missing template field
    Validation,

    /// Unexpected state inconsistency. Indicates a bug.
    ///
    /// Examples: action dispatched for a dead actor
    Internal,

    /// The engine cannot continue.
    ///
    /// Examples: required oracle missing
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
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

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all crawl-core errors.
///
/// - All error enums implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
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

/// Error type for actions that never fail.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("this error should never be constructed")]
pub enum NeverError {}

impl GameError for NeverError {
    fn severity(&self) -> ErrorSeverity {
        match *self {}
    }

    fn error_code(&self) -> &'static str {
        match *self {}
    }
}
