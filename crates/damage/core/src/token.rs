//! Token snapshots - the read-only health view the engine resolves against.
//!
//! A snapshot captures a token's health at session open so that every preview
//! and the final commit resolve against the same values, regardless of what
//! happens to the persisted entity in the meantime.

use std::fmt;

use crate::error::{EngineError, ErrorSeverity};

/// Opaque, stable identifier of a persisted token.
///
/// Used only to verify that the entities being written are the ones that
/// were snapshotted.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TokenId(pub String);

impl TokenId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TokenId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for TokenId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Errors raised when a snapshot cannot be built from raw values.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum TokenError {
    #[error("token {id}: {field} is not a finite number ({value})")]
    NonFinite {
        id: TokenId,
        field: &'static str,
        value: f64,
    },

    #[error("token {id}: max health must be non-negative, got {max_health}")]
    NegativeMaxHealth { id: TokenId, max_health: f64 },
}

impl EngineError for TokenError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NonFinite { .. } => "token_non_finite",
            Self::NegativeMaxHealth { .. } => "token_negative_max_health",
        }
    }
}

/// Immutable per-token view of current health state.
///
/// Invariants (enforced by [`TokenSnapshot::new`]):
/// - all values are finite
/// - `max_health >= 0`
/// - `0 <= health <= max_health`
/// - `temp_health >= 0`
///
/// Deserialization goes through [`TokenSnapshot::new`], so decoded snapshots
/// are validated and clamped the same way.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawSnapshot"))]
pub struct TokenSnapshot {
    id: TokenId,
    name: String,
    health: f64,
    max_health: f64,
    temp_health: f64,
}

/// Unvalidated wire form of [`TokenSnapshot`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawSnapshot {
    id: TokenId,
    name: String,
    health: f64,
    max_health: f64,
    temp_health: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSnapshot> for TokenSnapshot {
    type Error = TokenError;

    fn try_from(raw: RawSnapshot) -> Result<Self, Self::Error> {
        Self::new(
            raw.id,
            raw.name,
            raw.health,
            raw.max_health,
            raw.temp_health,
        )
    }
}

impl TokenSnapshot {
    /// Build a snapshot from raw persisted values.
    ///
    /// Out-of-range `health` and `temp_health` are clamped into their valid
    /// range so the snapshot always satisfies the at-rest invariant. A
    /// non-finite value or a negative `max_health` is rejected.
    pub fn new(
        id: impl Into<TokenId>,
        name: impl Into<String>,
        health: f64,
        max_health: f64,
        temp_health: f64,
    ) -> Result<Self, TokenError> {
        let id = id.into();

        for (field, value) in [
            ("health", health),
            ("max health", max_health),
            ("temporary health", temp_health),
        ] {
            if !value.is_finite() {
                return Err(TokenError::NonFinite { id, field, value });
            }
        }
        if max_health < 0.0 {
            return Err(TokenError::NegativeMaxHealth { id, max_health });
        }

        let clamped_health = health.clamp(0.0, max_health);
        let clamped_temp = temp_health.max(0.0);
        if clamped_health != health || clamped_temp != temp_health {
            tracing::debug!(
                token = %id,
                health,
                max_health,
                temp_health,
                "clamped out-of-range stored health values"
            );
        }

        Ok(Self {
            id,
            name: name.into(),
            health: clamped_health,
            max_health,
            temp_health: clamped_temp,
        })
    }

    pub fn id(&self) -> &TokenId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn health(&self) -> f64 {
        self.health
    }

    pub fn max_health(&self) -> f64 {
        self.max_health
    }

    pub fn temp_health(&self) -> f64 {
        self.temp_health
    }

    /// Display name shortened to `max_chars` characters, with an ellipsis
    /// appended when truncated.
    pub fn display_name(&self, max_chars: usize) -> String {
        truncate_name(&self.name, max_chars)
    }
}

/// Shorten `name` to `max_chars` characters, appending an ellipsis when
/// anything was cut.
pub fn truncate_name(name: &str, max_chars: usize) -> String {
    if name.chars().count() <= max_chars {
        return name.to_owned();
    }
    let head: String = name.chars().take(max_chars).collect();
    format!("{}\u{2026}", head.trim())
}
