//! All-or-nothing application of a patch batch to a token list.

use std::collections::HashMap;

use damage_core::{EngineConfig, MetadataPatch, TokenId};

use super::error::{RepositoryError, Result};
use super::traits::PersistedToken;

/// Merge every patch into `tokens`.
///
/// Every patch target is located before the first merge, so an unknown id
/// leaves `tokens` untouched.
pub(crate) fn apply_batch(
    tokens: &mut [PersistedToken],
    patches: &[MetadataPatch],
    config: &EngineConfig,
) -> Result<()> {
    let targets = {
        let positions: HashMap<&TokenId, usize> = tokens
            .iter()
            .enumerate()
            .map(|(index, token)| (&token.id, index))
            .collect();

        let targets = patches
            .iter()
            .map(|patch| {
                positions
                    .get(&patch.id)
                    .copied()
                    .ok_or_else(|| RepositoryError::UnknownToken(patch.id.clone()))
            })
            .collect::<Result<Vec<usize>>>()?;
        targets
    };

    for (patch, index) in patches.iter().zip(targets) {
        patch.merge_into(&mut tokens[index].metadata, config);
    }
    Ok(())
}
