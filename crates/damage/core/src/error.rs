//! Common error infrastructure for damage-core.
//!
//! Domain-specific errors (`TokenError`, `SessionError`) live next to the types
//! they validate. This module provides the severity classification and the
//! trait every engine error implements, so hosts can decide uniformly whether
//! a failure ends the session or is merely reported.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the operator can adjust input and try again
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistency inside the engine or store
/// - **Fatal**: the session cannot continue and must be re-opened
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with adjusted input.
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: non-finite health, negative max health
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: store lock poisoned, corrupted store file
    Internal,

    /// Fatal error - the session is terminated.
    ///
    /// Examples: identity mismatch between snapshot and persisted entities
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

    /// Returns true if this error terminates the current session.
    pub const fn ends_session(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all engine errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Return a stable snake_case code from `error_code` for logs and tests
pub trait EngineError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
