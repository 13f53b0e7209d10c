//! Deterministic damage and healing resolution for multi-token tables.
//!
//! `damage-core` defines the canonical rules (delta scaling, temp-health
//! absorption, clamping) and the session model that pairs each token snapshot
//! with its scaling tier. Everything here is pure; persistence and the batch
//! commit live in the runtime crate, which depends on the types re-exported
//! here.
pub mod config;
pub mod error;
#[cfg(feature = "serde")]
pub mod metadata;
pub mod parse;
pub mod resolution;
pub mod session;
pub mod tier;
pub mod token;

pub use config::EngineConfig;
pub use error::{EngineError, ErrorSeverity};
#[cfg(feature = "serde")]
pub use metadata::{HealthFields, snapshot_from_metadata};
pub use parse::{parse_delta, parse_float_prefix};
pub use resolution::{ResolvedHealth, resolve, resolve_token, scale};
pub use session::{MetadataPatch, ResolutionSession, ResolvedToken, SessionEntry, SessionError};
pub use tier::ScalingTier;
pub use token::{TokenError, TokenId, TokenSnapshot, truncate_name};
