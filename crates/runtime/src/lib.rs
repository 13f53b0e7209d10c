//! Runtime orchestration for damage resolution sessions.
//!
//! This crate wires the pure engine in `damage-core` to persisted token
//! state. Hosts plug in a [`TokenStore`], open sessions through
//! [`ResolutionService`], and commit them as a single batch.
//!
//! Modules are organized by responsibility:
//! - [`repository`] defines the store contract and the in-memory/file stores
//! - [`selection`] turns persisted tokens into session snapshots
//! - [`committer`] verifies identity and issues the batch write
//! - [`service`] hosts the session lifecycle façade
pub mod committer;
pub mod config;
pub mod error;
pub mod repository;
pub mod selection;
pub mod service;

pub use committer::{CommitError, CommitReport, commit, verify_identity};
pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use repository::{
    FileTokenStore, InMemoryTokenStore, PersistedToken, RepositoryError, SceneFile, TokenStore,
};
pub use selection::eligible_snapshots;
pub use service::ResolutionService;
