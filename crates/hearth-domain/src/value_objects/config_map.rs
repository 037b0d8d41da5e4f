//! Insertion-ordered mapping used for configuration documents

use std::collections::HashMap;

use super::ConfigValue;

/// Mapping from string keys to [`ConfigValue`]s that remembers insertion order
///
/// Replacing an existing key keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct ConfigMap {
    entries: Vec<(String, ConfigValue)>,
    index: HashMap<String, usize>,
}

impl ConfigMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no keys
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or replace a value, returning the previous one
    pub fn insert<K: Into<String>>(&mut self, key: K, value: ConfigValue) -> Option<ConfigValue> {
        let key = key.into();
        if let Some(&position) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[position].1, value));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    /// Value stored under exactly this key
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.index.get(key).map(|&position| &self.entries[position].1)
    }

    /// Whether exactly this key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Keep only the entries the predicate accepts, preserving order
    pub fn retain<F: FnMut(&str, &ConfigValue) -> bool>(&mut self, mut keep: F) {
        self.entries.retain(|(key, value)| keep(key, value));
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(position, (key, _))| (key.clone(), position))
            .collect();
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl PartialEq for ConfigMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Into<String>> FromIterator<(K, ConfigValue)> for ConfigMap {
    fn from_iter<I: IntoIterator<Item = (K, ConfigValue)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl IntoIterator for ConfigMap {
    type Item = (String, ConfigValue);
    type IntoIter = std::vec::IntoIter<(String, ConfigValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
