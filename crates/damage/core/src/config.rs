use crate::tier::ScalingTier;

/// Engine configuration: where health fields live in persisted metadata and
/// how new sessions are initialised.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Key of the namespaced object holding the health fields inside a
    /// token's metadata.
    pub namespace: String,
    pub health_key: String,
    pub max_health_key: String,
    pub temp_health_key: String,
    /// Tier assigned to every token when a session opens.
    pub default_tier: ScalingTier,
}

impl EngineConfig {
    pub const DEFAULT_NAMESPACE: &'static str = "com.damage-tool/metadata";
    pub const HEALTH_KEY: &'static str = "health";
    pub const MAX_HEALTH_KEY: &'static str = "max health";
    pub const TEMP_HEALTH_KEY: &'static str = "temporary health";

    /// Names longer than this are shortened in previews.
    pub const DISPLAY_NAME_CHARS: usize = 20;

    pub fn new() -> Self {
        Self {
            namespace: Self::DEFAULT_NAMESPACE.to_owned(),
            health_key: Self::HEALTH_KEY.to_owned(),
            max_health_key: Self::MAX_HEALTH_KEY.to_owned(),
            temp_health_key: Self::TEMP_HEALTH_KEY.to_owned(),
            default_tier: ScalingTier::default(),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_default_tier(mut self, tier: ScalingTier) -> Self {
        self.default_tier = tier;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
