//! Delta scaling.

use crate::tier::ScalingTier;

/// Scale the shared raw delta by a token's tier.
///
/// # Formula
///
/// ```text
/// effective_delta = raw_delta × multiplier(tier)
/// ```
///
/// The raw delta is already truncated toward zero by the time it gets here.
/// The multiplier applies identically to damage (negative) and healing
/// (positive) deltas.
pub fn scale(raw_delta: i64, tier: ScalingTier) -> f64 {
    raw_delta as f64 * tier.multiplier()
}
