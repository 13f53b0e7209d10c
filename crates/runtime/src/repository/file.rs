//! File-based TokenStore implementation.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use damage_core::{EngineConfig, MetadataPatch, TokenId};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::batch::apply_batch;
use super::error::{RepositoryError, Result};
use super::traits::{PersistedToken, TokenStore};

/// On-disk scene layout.
///
/// ```json
/// { "selection": ["a", "b"], "tokens": [ { "id": "a", "name": "...", "metadata": { ... } } ] }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneFile {
    #[serde(default)]
    pub selection: Vec<TokenId>,
    #[serde(default)]
    pub tokens: Vec<PersistedToken>,
}

/// File-based implementation of TokenStore.
///
/// The whole scene lives in one JSON file. Every batch is a single
/// read-modify-write of that file, written to a temp file and renamed into
/// place so readers never see a half-applied batch.
pub struct FileTokenStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileTokenStore {
    /// Open a store backed by `path`. The file must already exist.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a fresh scene file, replacing any existing one.
    pub async fn create(path: impl AsRef<Path>, scene: &SceneFile) -> Result<Self> {
        let store = Self::new(path);
        if let Some(parent) = store.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        store.save(scene).await?;
        Ok(store)
    }

    /// Load the current scene from disk.
    pub async fn load(&self) -> Result<SceneFile> {
        let bytes = tokio::fs::read(&self.path).await?;
        let scene: SceneFile = serde_json::from_slice(&bytes)?;
        tracing::debug!(
            path = %self.path.display(),
            tokens = scene.tokens.len(),
            "loaded scene"
        );
        Ok(scene)
    }

    async fn save(&self, scene: &SceneFile) -> Result<()> {
        let temp_path = self.path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(scene)?;

        // Write to temp file
        tokio::fs::write(&temp_path, bytes).await?;

        // Atomic rename
        tokio::fs::rename(&temp_path, &self.path).await?;

        tracing::debug!(path = %self.path.display(), "saved scene");
        Ok(())
    }
}

fn lookup(scene: &SceneFile, ids: &[TokenId]) -> Vec<PersistedToken> {
    ids.iter()
        .filter_map(|id| scene.tokens.iter().find(|token| &token.id == id).cloned())
        .collect()
}

fn first_duplicate(tokens: &[PersistedToken]) -> Option<&TokenId> {
    let mut seen = HashSet::with_capacity(tokens.len());
    tokens
        .iter()
        .map(|token| &token.id)
        .find(|id| !seen.insert(*id))
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn selection(&self) -> Result<Vec<PersistedToken>> {
        let scene = self.load().await?;
        Ok(lookup(&scene, &scene.selection))
    }

    async fn read(&self, ids: &[TokenId]) -> Result<Vec<PersistedToken>> {
        let scene = self.load().await?;
        Ok(lookup(&scene, ids))
    }

    async fn write_batch(&self, patches: &[MetadataPatch], config: &EngineConfig) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut scene = self.load().await?;
        if let Some(id) = first_duplicate(&scene.tokens) {
            return Err(RepositoryError::CorruptedData(format!(
                "duplicate token id {id} in {}",
                self.path.display()
            )));
        }

        apply_batch(&mut scene.tokens, patches, config)?;
        self.save(&scene).await
    }
}
