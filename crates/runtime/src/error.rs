//! Unified error type surfaced by the runtime API.
//!
//! Wraps store, session and commit failures so hosts can bubble them up with
//! consistent context.
use damage_core::{EngineError, ErrorSeverity, SessionError};
use thiserror::Error;

pub use crate::committer::CommitError;
pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Commit(#[from] CommitError),
}

impl EngineError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Repository(err) => err.severity(),
            Self::Session(err) => err.severity(),
            Self::Commit(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Repository(err) => err.error_code(),
            Self::Session(err) => err.error_code(),
            Self::Commit(err) => err.error_code(),
        }
    }
}
