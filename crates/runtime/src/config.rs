//! Runtime configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use damage_core::{EngineConfig, ScalingTier};

/// Configuration required to open sessions against a store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub engine: EngineConfig,
    /// JSON scene file used by the file-backed store.
    pub store_path: PathBuf,
}

impl RuntimeConfig {
    pub const STORE_FILE_NAME: &'static str = "scene.json";

    pub fn new(engine: EngineConfig, store_path: impl Into<PathBuf>) -> Self {
        Self {
            engine,
            store_path: store_path.into(),
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DAMAGE_TOOL_STORE` - Path to the JSON scene file (default: platform data dir)
    /// - `DAMAGE_TOOL_NAMESPACE` - Metadata namespace holding health fields
    /// - `DAMAGE_TOOL_DEFAULT_TIER` - Tier new sessions start with (default: full)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construct configuration from any variable source.
    ///
    /// Blank namespaces and unrecognised tiers fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup("DAMAGE_TOOL_STORE")
            && !path.trim().is_empty()
        {
            config.store_path = PathBuf::from(path);
        }

        if let Some(namespace) = lookup("DAMAGE_TOOL_NAMESPACE")
            && !namespace.trim().is_empty()
        {
            config.engine.namespace = namespace;
        }

        if let Some(value) = lookup("DAMAGE_TOOL_DEFAULT_TIER") {
            match ScalingTier::parse_lenient(&value) {
                Some(tier) => config.engine.default_tier = tier,
                None => tracing::warn!(%value, "unknown DAMAGE_TOOL_DEFAULT_TIER, using default"),
            }
        }

        config
    }

    /// Platform data directory for the scene file, falling back to the
    /// working directory.
    pub fn default_store_path() -> PathBuf {
        directories::ProjectDirs::from("com", "damage-tool", "damage-tool")
            .map(|dirs| dirs.data_dir().join(Self::STORE_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(Self::STORE_FILE_NAME))
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new(EngineConfig::default(), Self::default_store_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn lookup_reads_every_variable() {
        let config = RuntimeConfig::from_lookup(lookup(&[
            ("DAMAGE_TOOL_STORE", "/tmp/table/scene.json"),
            ("DAMAGE_TOOL_NAMESPACE", "stats"),
            ("DAMAGE_TOOL_DEFAULT_TIER", "Half"),
        ]));
        assert_eq!(config.store_path, PathBuf::from("/tmp/table/scene.json"));
        assert_eq!(config.engine.namespace, "stats");
        assert_eq!(config.engine.default_tier, ScalingTier::Half);
    }

    #[test]
    fn missing_variables_keep_defaults() {
        assert_eq!(RuntimeConfig::from_lookup(lookup(&[])), RuntimeConfig::default());
    }

    #[test]
    fn blank_namespace_is_ignored() {
        let config = RuntimeConfig::from_lookup(lookup(&[("DAMAGE_TOOL_NAMESPACE", "   ")]));
        assert_eq!(config.engine.namespace, EngineConfig::DEFAULT_NAMESPACE);
    }

    #[test]
    fn tier_aliases_are_accepted() {
        let config = RuntimeConfig::from_lookup(lookup(&[("DAMAGE_TOOL_DEFAULT_TIER", "x2")]));
        assert_eq!(config.engine.default_tier, ScalingTier::Double);
    }

    #[test]
    fn unknown_tier_falls_back_to_full() {
        let config = RuntimeConfig::from_lookup(lookup(&[("DAMAGE_TOOL_DEFAULT_TIER", "triple")]));
        assert_eq!(config.engine.default_tier, ScalingTier::Full);
    }

    #[test]
    fn default_store_path_ends_with_scene_file() {
        let config = RuntimeConfig::default();
        assert!(config.store_path.ends_with(RuntimeConfig::STORE_FILE_NAME));
        assert_eq!(config.engine, EngineConfig::default());
    }
}
