//! Scaling tiers applied to the shared health delta.

use core::str::FromStr;

/// Per-token multiplier applied to the operator's shared delta.
///
/// Each token in a session has exactly one active tier. The tier scales both
/// damage and healing identically.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ScalingTier {
    /// Token is unaffected (×0).
    None,
    /// Token takes half (×0.5).
    Half,
    /// Token takes the full delta (×1).
    #[default]
    Full,
    /// Token takes double (×2).
    Double,
}

impl ScalingTier {
    /// All tiers in display order (None, Half, Full, Double).
    pub const ALL: [Self; 4] = [Self::None, Self::Half, Self::Full, Self::Double];

    /// Multiplier applied to the shared delta.
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::None => 0.0,
            Self::Half => 0.5,
            Self::Full => 1.0,
            Self::Double => 2.0,
        }
    }

    /// Short column label used by the preview table.
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "x0",
            Self::Half => "1/2",
            Self::Full => "x1",
            Self::Double => "x2",
        }
    }

    /// Parse a tier from its name or a multiplier alias.
    ///
    /// Accepts `none`/`half`/`full`/`double` (any case) as well as
    /// `0`, `0.5`, `1/2`, `1`, `x1`, `2`, `x2`.
    pub fn parse_lenient(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if let Ok(tier) = Self::from_str(trimmed) {
            return Some(tier);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "0" | "x0" => Some(Self::None),
            "0.5" | ".5" | "1/2" | "x0.5" => Some(Self::Half),
            "1" | "x1" => Some(Self::Full),
            "2" | "x2" => Some(Self::Double),
            _ => None,
        }
    }
}
