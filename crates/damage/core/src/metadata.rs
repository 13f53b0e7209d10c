//! Reading and patching health fields in persisted token metadata.
//!
//! Token metadata is a JSON object; the health fields live in a namespaced
//! sub-object (see [`EngineConfig::namespace`]). Reads never fail: a missing
//! or unparseable value is simply absent. Writes merge two keys into the
//! namespaced object and leave every other key alone.

use serde_json::{Map, Value};

use crate::config::EngineConfig;
use crate::parse::parse_float_prefix;
use crate::session::MetadataPatch;
use crate::token::{TokenId, TokenSnapshot};

/// Parse a stored metadata value as a finite number.
///
/// Numbers are taken as-is, strings use leading-number parsing. Anything else
/// is absent.
pub fn parse_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64().filter(|v| v.is_finite()),
        Value::String(text) => parse_float_prefix(text),
        _ => None,
    }
}

/// Health fields as read from metadata, before defaults are applied.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HealthFields {
    pub health: Option<f64>,
    pub max_health: Option<f64>,
    pub temp_health: Option<f64>,
}

impl HealthFields {
    /// Read the three health fields from a token's metadata object.
    pub fn read(metadata: &Map<String, Value>, config: &EngineConfig) -> Self {
        let Some(Value::Object(fields)) = metadata.get(&config.namespace) else {
            return Self::default();
        };
        let field = |key: &str| fields.get(key).and_then(parse_value);
        Self {
            health: field(&config.health_key),
            max_health: field(&config.max_health_key),
            temp_health: field(&config.temp_health_key),
        }
    }

    /// Build a snapshot, or `None` if the token is not eligible.
    ///
    /// Missing health and temp health default to 0. A missing or negative max
    /// health excludes the token.
    pub fn into_snapshot(self, id: TokenId, name: &str) -> Option<TokenSnapshot> {
        let Some(max_health) = self.max_health else {
            tracing::debug!(token = %id, "excluded: no usable max health");
            return None;
        };

        match TokenSnapshot::new(
            id,
            name,
            self.health.unwrap_or(0.0),
            max_health,
            self.temp_health.unwrap_or(0.0),
        ) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                tracing::debug!(error = %err, "excluded: invalid health values");
                None
            }
        }
    }
}

/// Read a token's metadata into a snapshot, or `None` if it is not eligible.
pub fn snapshot_from_metadata(
    id: impl Into<TokenId>,
    name: &str,
    metadata: &Map<String, Value>,
    config: &EngineConfig,
) -> Option<TokenSnapshot> {
    HealthFields::read(metadata, config).into_snapshot(id.into(), name)
}

/// Encode a health value, keeping whole numbers integral in the JSON.
fn number_value(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}

impl MetadataPatch {
    /// Merge the two resolved fields into `metadata` by key.
    ///
    /// The namespaced object is created if absent (or replaced if it is not
    /// an object). All other keys, inside and outside the namespace, are
    /// preserved.
    pub fn merge_into(&self, metadata: &mut Map<String, Value>, config: &EngineConfig) {
        let slot = metadata
            .entry(config.namespace.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        if let Value::Object(fields) = slot {
            fields.insert(config.health_key.clone(), number_value(self.health));
            fields.insert(config.temp_health_key.clone(), number_value(self.temp_health));
        }
    }
}
