//! Open key/value configuration map.
//!
//! `Vars` backs per-node configuration, where the set of fields depends on
//! the node kind and is validated by a pluggable rule registry rather than
//! a fixed struct.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// An ordered JSON object used for open, per-node configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vars(Map<String, JsonValue>);

impl Vars {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn get(
        &self,
        key: &str,
    ) -> Option<&JsonValue> {
        self.0.get(key)
    }

    /// Gets a field as a string slice, if present and a string.
    pub fn get_str(
        &self,
        key: &str,
    ) -> Option<&str> {
        self.0.get(key).and_then(|v| v.as_str())
    }

    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<JsonValue>,
    ) {
        self.0.insert(key.into(), value.into());
    }

    pub fn contains(
        &self,
        key: &str,
    ) -> bool {
        self.0.contains_key(key)
    }

    /// Shallow merge: fields present in `other` overwrite fields in `self`;
    /// fields absent from `other` are left untouched.
    pub fn merge(
        &mut self,
        other: &Vars,
    ) {
        for (k, v) in other.0.iter() {
            self.0.insert(k.clone(), v.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &JsonValue)> {
        self.0.iter()
    }
}

impl From<JsonValue> for Vars {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Object(map) => Self(map),
            _ => Self::new(),
        }
    }
}

impl From<Vars> for JsonValue {
    fn from(vars: Vars) -> Self {
        JsonValue::Object(vars.0)
    }
}
