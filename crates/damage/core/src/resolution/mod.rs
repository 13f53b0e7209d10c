//! Damage and healing resolution.
//!
//! This module provides the pure functions the rest of the engine builds on.
//! All resolution logic is deterministic and side-effect free, and each
//! token's resolution is independent of every other token's.
//!
//! # Core Functions
//!
//! - `scale`: shared raw delta × tier multiplier
//! - `resolve`: applies an effective delta to health and temp health

pub mod health;
pub mod scale;

pub use health::{ResolvedHealth, resolve};
pub use scale::scale;

use crate::tier::ScalingTier;
use crate::token::TokenSnapshot;

/// Scale and resolve in one step for a single token.
pub fn resolve_token(token: &TokenSnapshot, raw_delta: i64, tier: ScalingTier) -> ResolvedHealth {
    let effective = scale(raw_delta, tier);
    resolve(
        token.health(),
        token.max_health(),
        token.temp_health(),
        effective,
    )
}
