//! Store contract for reading and patching persisted tokens.

use async_trait::async_trait;
use damage_core::{EngineConfig, MetadataPatch, TokenId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::Result;

/// A token as held by the persistent store.
///
/// `metadata` is the token's full metadata object; the health fields live in
/// a namespaced sub-object within it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PersistedToken {
    pub id: TokenId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl PersistedToken {
    pub fn new(id: impl Into<TokenId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            metadata: Map::new(),
        }
    }

    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Persistent token store.
///
/// The store owns the source of truth. The engine only reads the selection,
/// re-reads tokens at commit time, and hands back one batch of patches.
///
/// # Implementations
///
/// - `InMemoryTokenStore`: tests and embedding hosts
/// - `FileTokenStore`: JSON scene file on disk
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Tokens currently selected by the operator, in selection order.
    async fn selection(&self) -> Result<Vec<PersistedToken>>;

    /// Current persisted state of `ids`, in the order given.
    ///
    /// Ids the store no longer holds are left out of the result.
    async fn read(&self, ids: &[TokenId]) -> Result<Vec<PersistedToken>>;

    /// Apply every patch as one logical batch.
    ///
    /// Each patch is merged by key into the token's existing metadata, under
    /// the namespace and keys of `config`. If any patch names a token the
    /// store does not hold, nothing is written.
    async fn write_batch(&self, patches: &[MetadataPatch], config: &EngineConfig) -> Result<()>;
}
