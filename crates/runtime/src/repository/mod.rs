//! Repository layer for persisted tokens.
//!
//! The store owns the source of truth for token metadata. The engine reads
//! from it when a session opens, re-reads at commit time to verify identity,
//! and writes one merged batch.

mod batch;
mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::{FileTokenStore, SceneFile};
pub use memory::InMemoryTokenStore;
pub use traits::{PersistedToken, TokenStore};
