//! Health resolution: applies an effective delta to health and temp health.

/// New health values produced by [`resolve`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedHealth {
    pub health: f64,
    pub temp_health: f64,
}

impl ResolvedHealth {
    pub const fn new(health: f64, temp_health: f64) -> Self {
        Self {
            health,
            temp_health,
        }
    }
}

impl From<ResolvedHealth> for (f64, f64) {
    fn from(resolved: ResolvedHealth) -> Self {
        (resolved.health, resolved.temp_health)
    }
}

/// Apply an effective delta to a token's health.
///
/// # Rules
///
/// ```text
/// healing (delta >= 0):
///     health      = min(health + delta, max_health)
///     temp_health = temp_health                  (never restored)
///
/// damage (delta < 0), d = -delta:
///     absorbed    = min(temp_health, d)
///     temp_health = temp_health - absorbed
///     health      = max(health - (d - absorbed), 0)
/// ```
///
/// Results are clamped to `[0, max_health]` and `[0, ∞)`. No rounding is
/// performed. `max_health = 0` is valid and pins health to 0.
pub fn resolve(
    health: f64,
    max_health: f64,
    temp_health: f64,
    effective_delta: f64,
) -> ResolvedHealth {
    let max_health = max_health.max(0.0);

    let (new_health, new_temp) = if effective_delta >= 0.0 {
        ((health + effective_delta).min(max_health), temp_health)
    } else {
        let damage = -effective_delta;
        let absorbed = temp_health.min(damage);
        let remaining = damage - absorbed;
        ((health - remaining).max(0.0), temp_health - absorbed)
    };

    ResolvedHealth::new(new_health.clamp(0.0, max_health), new_temp.max(0.0))
}
