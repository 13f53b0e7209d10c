//! Turning persisted tokens into session snapshots.

use damage_core::metadata::snapshot_from_metadata;
use damage_core::{EngineConfig, TokenSnapshot};

use crate::repository::PersistedToken;

/// Snapshots of every eligible token, in input order.
///
/// Tokens without a usable max health are left out; this is not an error.
pub fn eligible_snapshots(tokens: &[PersistedToken], config: &EngineConfig) -> Vec<TokenSnapshot> {
    let snapshots: Vec<TokenSnapshot> = tokens
        .iter()
        .filter_map(|token| {
            snapshot_from_metadata(token.id.clone(), &token.name, &token.metadata, config)
        })
        .collect();

    let excluded = tokens.len() - snapshots.len();
    if excluded > 0 {
        tracing::debug!(
            selected = tokens.len(),
            excluded,
            "tokens without max health left out of session"
        );
    }
    snapshots
}
