use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::error::{TypesError, TypesResult};
use crate::legacy;

/// A flat mapping from variable names to arbitrary YAML values.
///
/// This is the shape of a job template's `extra_vars` and of the local file
/// applied to it. Only the top level is interpreted: nested mappings and
/// sequences are carried as opaque values. Entries are kept ordered by key so
/// serialization and logging are deterministic.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableMap(BTreeMap<String, Value>);

impl VariableMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a YAML document into a map.
    ///
    /// An empty document (or an explicit `null`) yields an empty map. Any
    /// other non-mapping document is rejected. Unquoted YAML 1.1 scalars such
    /// as `0755` and `yes` load as the integer and boolean a YAML 1.1 reader
    /// would produce.
    pub fn from_yaml_str(text: &str) -> TypesResult<Self> {
        if text.trim().is_empty() {
            return Ok(Self::new());
        }
        let value: Value = serde_yaml::from_str(&legacy::normalize(text))?;
        Self::from_value(value)
    }

    /// Convert an already-parsed YAML value into a map.
    pub fn from_value(value: Value) -> TypesResult<Self> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::Mapping(mapping) => {
                let mut vars = BTreeMap::new();
                for (key, value) in mapping {
                    let key = match key {
                        Value::String(s) => s,
                        Value::Number(n) => n.to_string(),
                        Value::Bool(b) => b.to_string(),
                        other => return Err(TypesError::UnsupportedKey(value_kind(&other))),
                    };
                    vars.insert(key, value);
                }
                Ok(Self(vars))
            }
            other => Err(TypesError::NotAMapping(value_kind(&other))),
        }
    }

    /// Serialize the map as a YAML document.
    pub fn to_yaml_string(&self) -> TypesResult<String> {
        Ok(serde_yaml::to_string(&self.0)?)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Insert a value, returning the previous one if the key existed.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.0.iter()
    }

    pub fn keys(&self) -> btree_map::Keys<'_, String, Value> {
        self.0.keys()
    }
}

impl FromIterator<(String, Value)> for VariableMap {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for VariableMap {
    type Item = (String, Value);
    type IntoIter = btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a VariableMap {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Short name of a YAML value's type, for diagnostics.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
