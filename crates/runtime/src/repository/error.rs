//! Error types raised by token store implementations.

use damage_core::{EngineError, ErrorSeverity, TokenId};
use thiserror::Error;

/// Errors surfaced by token store implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("token store lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("token {0} is not in the store")]
    UnknownToken(TokenId),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

impl EngineError for RepositoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownToken(_) => ErrorSeverity::Fatal,
            _ => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::LockPoisoned => "store_lock_poisoned",
            Self::Io(_) => "store_io",
            Self::Json(_) => "store_json",
            Self::UnknownToken(_) => "store_unknown_token",
            Self::CorruptedData(_) => "store_corrupted_data",
        }
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
