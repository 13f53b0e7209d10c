//! Batch commit of a resolution session.
//!
//! The committer re-reads the session's tokens from the store, checks that
//! they are still the same entities in the same order, and only then issues a
//! single batch write. A mismatch aborts the whole batch before any write.

use damage_core::{
    EngineConfig, EngineError, ErrorSeverity, MetadataPatch, ResolutionSession, ResolvedToken,
    TokenId,
};
use thiserror::Error;

use crate::repository::{PersistedToken, RepositoryError, TokenStore};

/// Errors that terminate a commit.
#[derive(Debug, Error)]
pub enum CommitError {
    #[error(
        "token mismatch at position {position}: expected {}, found {}",
        .expected.as_ref().map_or("nothing", TokenId::as_str),
        .found.as_ref().map_or("nothing", TokenId::as_str)
    )]
    IdentityMismatch {
        position: usize,
        expected: Option<TokenId>,
        found: Option<TokenId>,
    },

    #[error(transparent)]
    Store(#[from] RepositoryError),
}

impl EngineError for CommitError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::IdentityMismatch { .. } => ErrorSeverity::Fatal,
            Self::Store(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::IdentityMismatch { .. } => "commit_identity_mismatch",
            Self::Store(err) => err.error_code(),
        }
    }
}

/// Outcome of a successful commit.
#[derive(Clone, Debug, PartialEq)]
pub struct CommitReport {
    /// Every token in session order, with its before and after health.
    pub tokens: Vec<ResolvedToken>,
}

impl CommitReport {
    /// Number of tokens whose health or temp health changed.
    pub fn changed(&self) -> usize {
        self.tokens.iter().filter(|token| !token.is_unchanged()).count()
    }
}

/// Check that `persisted` holds the session's tokens, position by position.
///
/// A shorter or longer list is a mismatch at the first position without a
/// partner.
pub fn verify_identity(
    session: &ResolutionSession,
    persisted: &[PersistedToken],
) -> Result<(), CommitError> {
    let expected: Vec<&TokenId> = session.ids().collect();
    let positions = expected.len().max(persisted.len());

    for position in 0..positions {
        let want = expected.get(position).copied();
        let found = persisted.get(position).map(|token| &token.id);
        if want != found {
            return Err(CommitError::IdentityMismatch {
                position,
                expected: want.cloned(),
                found: found.cloned(),
            });
        }
    }
    Ok(())
}

/// Commit `session` to `store` as one batch.
///
/// `config` must be the configuration the session was opened with, so the
/// resolved fields land in the namespace they were read from. Consumes the
/// session: whether the commit succeeds or aborts, the session is over.
pub async fn commit<S>(
    session: ResolutionSession,
    store: &S,
    config: &EngineConfig,
) -> Result<CommitReport, CommitError>
where
    S: TokenStore + ?Sized,
{
    let ids: Vec<TokenId> = session.ids().cloned().collect();
    let persisted = store.read(&ids).await?;

    if let Err(err) = verify_identity(&session, &persisted) {
        tracing::warn!(error = %err, "aborting batch, no tokens written");
        return Err(err);
    }

    let resolved = session.preview();
    let patches: Vec<MetadataPatch> = resolved.iter().map(ResolvedToken::patch).collect();
    for token in &resolved {
        tracing::debug!(
            token = %token.id,
            tier = %token.tier,
            delta = token.effective_delta,
            health = token.after.health,
            temp_health = token.after.temp_health,
            "resolved"
        );
    }

    store.write_batch(&patches, config).await?;

    let report = CommitReport { tokens: resolved };
    tracing::info!(
        tokens = report.tokens.len(),
        changed = report.changed(),
        raw_delta = session.raw_delta(),
        "committed batch"
    );
    Ok(report)
}
