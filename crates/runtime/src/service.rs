//! Session lifecycle against a token store.

use damage_core::{EngineConfig, ResolutionSession, TokenId};

use crate::committer::{self, CommitError, CommitReport};
use crate::config::RuntimeConfig;
use crate::error::Result;
use crate::repository::{FileTokenStore, TokenStore};
use crate::selection::eligible_snapshots;

/// Opens sessions from a store and commits them back to it.
///
/// # Design Pattern: Facade
///
/// Hosts hold one service per store. Each session it opens is independent;
/// committing or cancelling a session consumes it.
pub struct ResolutionService {
    store: Box<dyn TokenStore>,
    config: EngineConfig,
}

impl ResolutionService {
    /// `config` is used both to read sessions and to merge their commits.
    pub fn new(store: Box<dyn TokenStore>, config: EngineConfig) -> Self {
        Self { store, config }
    }

    /// Service backed by the JSON scene file named in `config`.
    pub fn file_backed(config: &RuntimeConfig) -> Self {
        let store = FileTokenStore::new(&config.store_path);
        Self::new(Box::new(store), config.engine.clone())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &dyn TokenStore {
        self.store.as_ref()
    }

    /// Open a session over the operator's current selection.
    pub async fn open_session(&self) -> Result<ResolutionSession> {
        let selected = self.store.selection().await?;
        let snapshots = eligible_snapshots(&selected, &self.config);
        Ok(ResolutionSession::open(snapshots, &self.config)?)
    }

    /// Open a session over explicit token ids, in the order given.
    ///
    /// Ids the store does not hold are skipped.
    pub async fn open_session_for(&self, ids: &[TokenId]) -> Result<ResolutionSession> {
        let found = self.store.read(ids).await?;
        if found.len() < ids.len() {
            tracing::warn!(
                requested = ids.len(),
                found = found.len(),
                "some requested tokens are not in the store"
            );
        }
        let snapshots = eligible_snapshots(&found, &self.config);
        Ok(ResolutionSession::open(snapshots, &self.config)?)
    }

    /// Commit `session` as one batch. See [`committer::commit`].
    pub async fn commit(
        &self,
        session: ResolutionSession,
    ) -> std::result::Result<CommitReport, CommitError> {
        committer::commit(session, self.store.as_ref(), &self.config).await
    }
}
