//! In-memory TokenStore implementation for tests and embedding hosts.

use std::sync::RwLock;

use async_trait::async_trait;
use damage_core::{EngineConfig, MetadataPatch, TokenId};

use super::batch::apply_batch;
use super::error::{RepositoryError, Result};
use super::traits::{PersistedToken, TokenStore};

#[derive(Debug, Default)]
struct Scene {
    tokens: Vec<PersistedToken>,
    selection: Vec<TokenId>,
}

/// In-memory implementation of TokenStore.
///
/// Holds tokens in insertion order. The selection defaults to every token.
pub struct InMemoryTokenStore {
    scene: RwLock<Scene>,
}

impl InMemoryTokenStore {
    /// Create a store holding `tokens`, all of them selected.
    pub fn new(tokens: Vec<PersistedToken>) -> Self {
        let selection = tokens.iter().map(|token| token.id.clone()).collect();
        Self {
            scene: RwLock::new(Scene { tokens, selection }),
        }
    }

    /// Replace the operator's selection.
    pub fn select(&self, ids: impl IntoIterator<Item = TokenId>) -> Result<()> {
        let mut scene = self
            .scene
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        scene.selection = ids.into_iter().collect();
        Ok(())
    }

    /// Current persisted state of a single token.
    pub fn token(&self, id: &TokenId) -> Result<Option<PersistedToken>> {
        let scene = self
            .scene
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(scene.tokens.iter().find(|token| &token.id == id).cloned())
    }

    /// Remove a token, as if it were deleted from the scene.
    pub fn remove(&self, id: &TokenId) -> Result<Option<PersistedToken>> {
        let mut scene = self
            .scene
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let position = scene.tokens.iter().position(|token| &token.id == id);
        Ok(position.map(|index| scene.tokens.remove(index)))
    }

    /// Insert or replace a token.
    pub fn upsert(&self, token: PersistedToken) -> Result<()> {
        let mut scene = self
            .scene
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        match scene.tokens.iter_mut().find(|existing| existing.id == token.id) {
            Some(existing) => *existing = token,
            None => scene.tokens.push(token),
        }
        Ok(())
    }
}

impl Default for InMemoryTokenStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

fn lookup(tokens: &[PersistedToken], ids: &[TokenId]) -> Vec<PersistedToken> {
    ids.iter()
        .filter_map(|id| tokens.iter().find(|token| &token.id == id).cloned())
        .collect()
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn selection(&self) -> Result<Vec<PersistedToken>> {
        let scene = self
            .scene
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(lookup(&scene.tokens, &scene.selection))
    }

    async fn read(&self, ids: &[TokenId]) -> Result<Vec<PersistedToken>> {
        let scene = self
            .scene
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(lookup(&scene.tokens, ids))
    }

    async fn write_batch(&self, patches: &[MetadataPatch], config: &EngineConfig) -> Result<()> {
        let mut scene = self
            .scene
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        apply_batch(&mut scene.tokens, patches, config)?;
        tracing::debug!(tokens = patches.len(), "applied batch to in-memory store");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> InMemoryTokenStore {
        InMemoryTokenStore::new(vec![
            PersistedToken::new("a", "Goblin"),
            PersistedToken::new("b", "Orc"),
            PersistedToken::new("c", "Troll"),
        ])
    }

    #[tokio::test]
    async fn selection_defaults_to_all_tokens() {
        let selected = store().selection().await.unwrap();
        let names: Vec<_> = selected.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Goblin", "Orc", "Troll"]);
    }

    #[tokio::test]
    async fn selection_follows_select_order() {
        let store = store();
        store.select([TokenId::from("c"), TokenId::from("a")]).unwrap();
        let selected = store.selection().await.unwrap();
        let ids: Vec<_> = selected.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["c", "a"]);
    }

    #[tokio::test]
    async fn read_skips_missing_ids() {
        let store = store();
        store.remove(&TokenId::from("b")).unwrap();
        let read = store
            .read(&[TokenId::from("a"), TokenId::from("b"), TokenId::from("c")])
            .await
            .unwrap();
        let ids: Vec<_> = read.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
    }
}
