//! Resolution sessions.
//!
//! A session pairs every token snapshot with its scaling tier and holds the
//! shared raw delta. Snapshots and tiers live in one ordered list, so a tier
//! can never point at the wrong token. The session is consumed by commit or
//! cancel; a closed session cannot be touched again.

use crate::config::EngineConfig;
use crate::error::{EngineError, ErrorSeverity};
use crate::parse::parse_delta;
use crate::resolution::{ResolvedHealth, resolve_token, scale};
use crate::tier::ScalingTier;
use crate::token::{TokenId, TokenSnapshot};

/// Errors raised while opening a session.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("no eligible tokens selected")]
    NoEligibleTokens,
}

impl EngineError for SessionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoEligibleTokens => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoEligibleTokens => "session_no_eligible_tokens",
        }
    }
}

/// One token in a session together with its selected tier.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionEntry {
    pub snapshot: TokenSnapshot,
    pub tier: ScalingTier,
}

/// Preview of what committing would do to one token.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedToken {
    pub id: TokenId,
    pub name: String,
    pub tier: ScalingTier,
    pub effective_delta: f64,
    pub max_health: f64,
    pub before: ResolvedHealth,
    pub after: ResolvedHealth,
}

impl ResolvedToken {
    /// The two-field patch to persist for this token.
    pub fn patch(&self) -> MetadataPatch {
        MetadataPatch {
            id: self.id.clone(),
            health: self.after.health,
            temp_health: self.after.temp_health,
        }
    }

    pub fn is_unchanged(&self) -> bool {
        self.before == self.after
    }
}

/// Field-level update for one token's persisted health.
///
/// Only these two fields are written; every other metadata key is preserved.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetadataPatch {
    pub id: TokenId,
    pub health: f64,
    pub temp_health: f64,
}

/// An open resolve-and-commit cycle over a fixed, ordered set of tokens.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolutionSession {
    raw_delta: i64,
    entries: Vec<SessionEntry>,
}

impl ResolutionSession {
    /// Open a session with every token at the configured default tier.
    ///
    /// Fails when `snapshots` is empty.
    pub fn open(
        snapshots: impl IntoIterator<Item = TokenSnapshot>,
        config: &EngineConfig,
    ) -> Result<Self, SessionError> {
        let entries: Vec<SessionEntry> = snapshots
            .into_iter()
            .map(|snapshot| SessionEntry {
                snapshot,
                tier: config.default_tier,
            })
            .collect();

        if entries.is_empty() {
            return Err(SessionError::NoEligibleTokens);
        }

        tracing::info!(tokens = entries.len(), "opened resolution session");
        Ok(Self {
            raw_delta: 0,
            entries,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a successfully opened session.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[SessionEntry] {
        &self.entries
    }

    pub fn ids(&self) -> impl Iterator<Item = &TokenId> {
        self.entries.iter().map(|entry| entry.snapshot.id())
    }

    pub fn raw_delta(&self) -> i64 {
        self.raw_delta
    }

    pub fn set_raw_delta(&mut self, raw_delta: i64) {
        self.raw_delta = raw_delta;
    }

    /// Set the shared delta from operator text (see [`parse_delta`]).
    pub fn set_delta_input(&mut self, input: &str) {
        self.raw_delta = parse_delta(input);
    }

    /// Current tier of the token at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range for this session.
    pub fn tier(&self, index: usize) -> ScalingTier {
        self.entries[index].tier
    }

    /// Select the tier of the token at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range for this session.
    pub fn set_tier(&mut self, index: usize, tier: ScalingTier) {
        let entry = &mut self.entries[index];
        tracing::debug!(token = %entry.snapshot.id(), %tier, "tier selected");
        entry.tier = tier;
    }

    /// Effective delta for the token at `index` under its current tier.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range for this session.
    pub fn effective_delta(&self, index: usize) -> f64 {
        scale(self.raw_delta, self.entries[index].tier)
    }

    /// Resolve every token against the current delta and tiers without
    /// committing anything.
    pub fn preview(&self) -> Vec<ResolvedToken> {
        self.entries
            .iter()
            .map(|entry| {
                let snapshot = &entry.snapshot;
                ResolvedToken {
                    id: snapshot.id().clone(),
                    name: snapshot.name().to_owned(),
                    tier: entry.tier,
                    effective_delta: scale(self.raw_delta, entry.tier),
                    max_health: snapshot.max_health(),
                    before: ResolvedHealth::new(snapshot.health(), snapshot.temp_health()),
                    after: resolve_token(snapshot, self.raw_delta, entry.tier),
                }
            })
            .collect()
    }

    /// Close the session without writing anything.
    pub fn cancel(self) {
        tracing::info!(tokens = self.entries.len(), "resolution session cancelled");
    }
}
