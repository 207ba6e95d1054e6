//! Ordered query parameters with last-write-wins merging.

use serde_json::{Map, Value};

/// Query string parameters in insertion order.
///
/// Setting a key that is already present replaces its value in place, so a
/// later write always wins while the original position is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing any earlier value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Set `key` only when `value` is a non-empty string.
    pub fn set_opt(&mut self, key: &str, value: Option<&str>) {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.set(key, value);
        }
    }

    /// Overlay caller-supplied filters in order.
    ///
    /// JSON strings are sent verbatim, `null` is skipped, and any other value
    /// is sent as its JSON text.
    pub fn merge(&mut self, filters: &Map<String, Value>) {
        for (key, value) in filters {
            match value {
                Value::Null => {}
                Value::String(s) => self.set(key.as_str(), s.as_str()),
                other => self.set(key.as_str(), other.to_string()),
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}
