use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Contents of `config.json`: a flat, case-insensitive string map.
///
/// Keys are lower-cased on every access path (including deserialization),
/// so `Workspace` and `workspace` are the same key. A `BTreeMap` keeps the
/// serialized file stable between writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct ConfigMap(BTreeMap<String, String>);

impl ConfigMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `value` to `key`, replacing any previous value.
    pub fn set(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        self.0.insert(key.as_ref().to_lowercase(), value.into());
    }

    /// The value of `key`, or `""` when absent.
    pub fn key(&self, key: impl AsRef<str>) -> &str {
        self.get(key).unwrap_or("")
    }

    pub fn get(&self, key: impl AsRef<str>) -> Option<&str> {
        self.0.get(&key.as_ref().to_lowercase()).map(String::as_str)
    }

    pub fn has(&self, key: impl AsRef<str>) -> bool {
        self.0.contains_key(&key.as_ref().to_lowercase())
    }

    pub fn remove(&mut self, key: impl AsRef<str>) -> Option<String> {
        self.0.remove(&key.as_ref().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keys in lexicographic order, for deterministic display.
    pub fn sorted_keys(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<BTreeMap<String, String>> for ConfigMap {
    fn from(raw: BTreeMap<String, String>) -> Self {
        raw.into_iter().collect()
    }
}

impl From<ConfigMap> for BTreeMap<String, String> {
    fn from(map: ConfigMap) -> Self {
        map.0
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for ConfigMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.set(k, v);
        }
        map
    }
}

/// Well-known configuration keys.
pub mod keys {
    pub const EDITOR: &str = "editor";
    pub const WORKSPACE: &str = "workspace";
    /// Default project-structure template name.
    pub const PROJECT_STRUCTURE: &str = "projectstructure";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_case_insensitive() {
        let mut cfg = ConfigMap::new();
        cfg.set("WorkSpace", "/tmp/ws");

        assert_eq!(cfg.key("workspace"), "/tmp/ws");
        assert_eq!(cfg.key("WORKSPACE"), "/tmp/ws");
        assert!(cfg.has("Workspace"));
        assert_eq!(cfg.sorted_keys(), vec!["workspace"]);
    }

    #[test]
    fn missing_key_is_empty_string() {
        let cfg = ConfigMap::new();
        assert_eq!(cfg.key("editor"), "");
        assert!(cfg.get("editor").is_none());
    }

    #[test]
    fn deserialization_lowercases_keys() {
        let cfg: ConfigMap = serde_json::from_str(r#"{"Editor": "vim", "yourname": "x"}"#).unwrap();
        assert_eq!(cfg.key("editor"), "vim");
        assert_eq!(cfg.sorted_keys(), vec!["editor", "yourname"]);
    }

    #[test]
    fn rejects_non_string_values() {
        assert!(serde_json::from_str::<ConfigMap>(r#"{"a": 1}"#).is_err());
        assert!(serde_json::from_str::<ConfigMap>(r#"["a"]"#).is_err());
    }

    #[test]
    fn serializes_as_flat_object() {
        let cfg: ConfigMap = [("b", "2"), ("a", "1")].into_iter().collect();
        assert_eq!(serde_json::to_string(&cfg).unwrap(), r#"{"a":"1","b":"2"}"#);
    }
}
