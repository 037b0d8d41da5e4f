//! Layered configuration store

use super::{ConfigMap, ConfigValue};
use crate::error::{Error, Result};
use crate::ports::ServiceInstance;

/// Ordered key/value configuration shared by a container and its services
///
/// Sources are layered with [`ConfigurationStore::merge`]: a later layer
/// replaces whole top-level values, it never deep-merges nested mappings.
/// Lookups accept dotted keys and first try the key verbatim, then walk
/// nested mappings segment by segment, so `a.b.c` finds both a flat
/// `"a.b.c"` entry and `a: { b: { c: ... } }`.
///
/// Storing a key drops every earlier flat key spelled under it, so a later
/// `a: { b: ... }` also replaces an earlier `"a.b"`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigurationStore {
    values: ConfigMap,
}

impl ConfigurationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`ConfigurationStore::put`]
    #[must_use]
    pub fn with<K: Into<String>, V: Into<ConfigValue>>(mut self, key: K, value: V) -> Self {
        self.put(key, value);
        self
    }

    /// Store a top-level value, replacing any previous one
    pub fn put<K: Into<String>, V: Into<ConfigValue>>(&mut self, key: K, value: V) {
        let key = key.into();
        self.values.retain(|existing, _| !is_spelled_under(existing, &key));
        self.values.insert(key, value.into());
    }

    /// Layer another source on top of this one (top-level replace)
    pub fn merge(&mut self, layer: ConfigMap) {
        for (key, value) in layer {
            self.put(key, value);
        }
    }

    /// Number of top-level keys
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Top-level entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.values.iter()
    }

    /// Look up a dotted key
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        lookup(&self.values, key)
    }

    /// Whether a dotted key resolves to a value
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Scalar under `key` rendered as a string
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).and_then(ConfigValue::to_scalar_string)
    }

    /// List of scalars under `key`
    ///
    /// An absent or null key yields an empty list and a lone scalar yields a
    /// one-element list. Nested lists, mappings and instances are rejected.
    pub fn get_string_list(&self, key: &str) -> Result<Vec<String>> {
        match self.get(key) {
            None | Some(ConfigValue::Null) => Ok(Vec::new()),
            Some(ConfigValue::List(items)) => items
                .iter()
                .map(|item| {
                    item.to_scalar_string().ok_or_else(|| {
                        Error::configuration(format!(
                            "'{key}' must list scalars, found {}",
                            item.kind()
                        ))
                    })
                })
                .collect(),
            Some(other) => other.to_scalar_string().map(|value| vec![value]).ok_or_else(|| {
                Error::configuration(format!("'{key}' must be a list, found {}", other.kind()))
            }),
        }
    }

    /// Pre-built instance stored under `key`
    pub fn get_instance(&self, key: &str) -> Option<&ServiceInstance> {
        self.values.get(key).and_then(ConfigValue::as_instance)
    }

    /// Borrow the underlying top-level mapping
    pub fn as_map(&self) -> &ConfigMap {
        &self.values
    }
}

/// Whether `key` is a dotted path below `parent`
fn is_spelled_under(key: &str, parent: &str) -> bool {
    key.len() > parent.len() && key.starts_with(parent) && key.as_bytes()[parent.len()] == b'.'
}

fn lookup<'a>(map: &'a ConfigMap, key: &str) -> Option<&'a ConfigValue> {
    if let Some(value) = map.get(key) {
        return Some(value);
    }
    for (position, _) in key.match_indices('.') {
        if let Some(ConfigValue::Map(inner)) = map.get(&key[..position]) {
            if let Some(value) = lookup(inner, &key[position + 1..]) {
                return Some(value);
            }
        }
    }
    None
}
