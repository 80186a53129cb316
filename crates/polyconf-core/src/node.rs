//! The universal configuration tree
//!
//! Every renderer consumes a [`ConfigNode`]: a tagged union over mappings,
//! sequences and scalars. Two scalar kinds go beyond what YAML/JSON can
//! express and exist only for API construction:
//!
//! - [`ConfigNode::Atom`] - a symbolic identifier, rendered bare (unquoted)
//!   by the javastyle and event-pipeline renderers
//! - [`ConfigNode::Pattern`] - a regex-like value, rendered single-quoted
//!   and verbatim
//!
//! Mappings preserve insertion order; renderers rely on it.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;
use std::path::Path;

use crate::error::Result;

/// A mapping key: a plain string, or a symbolic atom awaiting normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Str(String),
    Atom(String),
}

impl Key {
    /// The key's string form, regardless of kind.
    pub fn as_str(&self) -> &str {
        match self {
            Key::Str(s) | Key::Atom(s) => s,
        }
    }

    pub fn is_atom(&self) -> bool {
        matches!(self, Key::Atom(_))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

/// Order-preserving mapping from keys to nodes.
pub type Map = IndexMap<Key, ConfigNode>;

/// The universal input type consumed by every renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigNode {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Symbolic atom; survives normalization only as a plain string.
    Atom(String),
    /// Regex-like value, kept verbatim.
    Pattern(String),
    Sequence(Vec<ConfigNode>),
    Mapping(Map),
}

impl ConfigNode {
    /// Create an empty mapping node.
    pub fn mapping() -> Self {
        ConfigNode::Mapping(Map::new())
    }

    /// Create a symbolic atom.
    pub fn atom(name: impl Into<String>) -> Self {
        ConfigNode::Atom(name.into())
    }

    /// Create a regex-like pattern value.
    pub fn pattern(source: impl Into<String>) -> Self {
        ConfigNode::Pattern(source.into())
    }

    /// Load a tree from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse a tree from YAML text.
    ///
    /// Mapping order follows document order. Atoms and patterns cannot
    /// originate from YAML; they are API-only constructions.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        Ok(from_yaml_value(&value))
    }

    /// Parse a tree from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Ok(from_json_value(&value))
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, ConfigNode::Mapping(_))
    }

    pub fn as_mapping(&self) -> Option<&Map> {
        match self {
            ConfigNode::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[ConfigNode]> {
        match self {
            ConfigNode::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigNode::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get a direct child of a mapping node by key string.
    pub fn get(&self, key: &str) -> Option<&ConfigNode> {
        match self {
            ConfigNode::Mapping(map) => map
                .iter()
                .find(|(k, _)| k.as_str() == key)
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// The plain string form of a scalar, as used by the line-oriented
    /// renderers (exports, ini, properties, flatline).
    ///
    /// Strings, atoms and pattern sources render verbatim; `Null` renders
    /// as the empty string; integral floats keep a trailing `.0`.
    pub fn to_display_string(&self) -> String {
        match self {
            ConfigNode::Null => String::new(),
            ConfigNode::Bool(b) => b.to_string(),
            ConfigNode::Int(i) => i.to_string(),
            ConfigNode::Float(f) => format_float(*f),
            ConfigNode::String(s) | ConfigNode::Atom(s) | ConfigNode::Pattern(s) => s.clone(),
            ConfigNode::Sequence(items) => items
                .iter()
                .map(ConfigNode::to_display_string)
                .collect::<Vec<_>>()
                .join(", "),
            ConfigNode::Mapping(_) => String::new(),
        }
    }
}

/// Format a float so that integral values keep a decimal point (`2.0`,
/// not `2`), matching how config consumers distinguish floats from ints.
pub fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 {
        format!("{f:.1}")
    } else {
        f.to_string()
    }
}

impl From<bool> for ConfigNode {
    fn from(b: bool) -> Self {
        ConfigNode::Bool(b)
    }
}

impl From<i64> for ConfigNode {
    fn from(i: i64) -> Self {
        ConfigNode::Int(i)
    }
}

impl From<i32> for ConfigNode {
    fn from(i: i32) -> Self {
        ConfigNode::Int(i64::from(i))
    }
}

impl From<f64> for ConfigNode {
    fn from(f: f64) -> Self {
        ConfigNode::Float(f)
    }
}

impl From<&str> for ConfigNode {
    fn from(s: &str) -> Self {
        ConfigNode::String(s.to_string())
    }
}

impl From<String> for ConfigNode {
    fn from(s: String) -> Self {
        ConfigNode::String(s)
    }
}

impl From<Vec<ConfigNode>> for ConfigNode {
    fn from(items: Vec<ConfigNode>) -> Self {
        ConfigNode::Sequence(items)
    }
}

impl From<Map> for ConfigNode {
    fn from(map: Map) -> Self {
        ConfigNode::Mapping(map)
    }
}

/// Serialization view: atoms and patterns flatten to plain strings, mapping
/// keys to their string form. This is what the delegating renderers
/// (YAML/JSON/TOML) see.
impl Serialize for ConfigNode {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ConfigNode::Null => serializer.serialize_unit(),
            ConfigNode::Bool(b) => serializer.serialize_bool(*b),
            ConfigNode::Int(i) => serializer.serialize_i64(*i),
            ConfigNode::Float(f) => serializer.serialize_f64(*f),
            ConfigNode::String(s) | ConfigNode::Atom(s) | ConfigNode::Pattern(s) => {
                serializer.serialize_str(s)
            }
            ConfigNode::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            ConfigNode::Mapping(map) => {
                let mut m = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    m.serialize_entry(k.as_str(), v)?;
                }
                m.end()
            }
        }
    }
}

fn from_yaml_value(value: &serde_yaml::Value) -> ConfigNode {
    match value {
        serde_yaml::Value::Null => ConfigNode::Null,
        serde_yaml::Value::Bool(b) => ConfigNode::Bool(*b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                ConfigNode::Int(i)
            } else {
                ConfigNode::Float(n.as_f64().unwrap_or(0.0))
            }
        }
        serde_yaml::Value::String(s) => ConfigNode::String(s.clone()),
        serde_yaml::Value::Sequence(items) => {
            ConfigNode::Sequence(items.iter().map(from_yaml_value).collect())
        }
        serde_yaml::Value::Mapping(mapping) => {
            let mut map = Map::new();
            for (k, v) in mapping {
                let key = match k {
                    serde_yaml::Value::String(s) => Key::Str(s.clone()),
                    other => Key::Str(yaml_key_string(other)),
                };
                map.insert(key, from_yaml_value(v));
            }
            ConfigNode::Mapping(map)
        }
        serde_yaml::Value::Tagged(tagged) => from_yaml_value(&tagged.value),
    }
}

/// String form of a non-string YAML mapping key.
fn yaml_key_string(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::Null => String::new(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

fn from_json_value(value: &serde_json::Value) -> ConfigNode {
    match value {
        serde_json::Value::Null => ConfigNode::Null,
        serde_json::Value::Bool(b) => ConfigNode::Bool(*b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                ConfigNode::Int(i)
            } else {
                ConfigNode::Float(n.as_f64().unwrap_or(0.0))
            }
        }
        serde_json::Value::String(s) => ConfigNode::String(s.clone()),
        serde_json::Value::Array(items) => {
            ConfigNode::Sequence(items.iter().map(from_json_value).collect())
        }
        serde_json::Value::Object(obj) => {
            let mut map = Map::new();
            for (k, v) in obj {
                map.insert(Key::Str(k.clone()), from_json_value(v));
            }
            ConfigNode::Mapping(map)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_yaml_preserves_order() {
        let node = ConfigNode::from_yaml("z: 1\na: 2\nm: 3\n").unwrap();
        let map = node.as_mapping().unwrap();
        let keys: Vec<&str> = map.keys().map(Key::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_from_yaml_scalars() {
        let node = ConfigNode::from_yaml("i: 42\nf: 1.5\nb: true\ns: hello\nn: null\n").unwrap();
        assert_eq!(node.get("i"), Some(&ConfigNode::Int(42)));
        assert_eq!(node.get("f"), Some(&ConfigNode::Float(1.5)));
        assert_eq!(node.get("b"), Some(&ConfigNode::Bool(true)));
        assert_eq!(node.get("s"), Some(&ConfigNode::String("hello".into())));
        assert_eq!(node.get("n"), Some(&ConfigNode::Null));
    }

    #[test]
    fn test_from_json_nested() {
        let node = ConfigNode::from_json(r#"{"a": {"b": [1, 2]}}"#).unwrap();
        let inner = node.get("a").unwrap().get("b").unwrap();
        assert_eq!(
            inner,
            &ConfigNode::Sequence(vec![ConfigNode::Int(1), ConfigNode::Int(2)])
        );
    }

    #[test]
    fn test_display_string() {
        assert_eq!(ConfigNode::from("text").to_display_string(), "text");
        assert_eq!(ConfigNode::Int(7).to_display_string(), "7");
        assert_eq!(ConfigNode::Float(2.0).to_display_string(), "2.0");
        assert_eq!(ConfigNode::Float(1.25).to_display_string(), "1.25");
        assert_eq!(ConfigNode::Bool(false).to_display_string(), "false");
        assert_eq!(ConfigNode::Null.to_display_string(), "");
        assert_eq!(ConfigNode::atom("verbose").to_display_string(), "verbose");
    }

    #[test]
    fn test_serialize_atoms_as_strings() {
        let mut map = Map::new();
        map.insert(Key::Atom("mode".into()), ConfigNode::atom("fast"));
        let json = serde_json::to_string(&ConfigNode::Mapping(map)).unwrap();
        assert_eq!(json, r#"{"mode":"fast"}"#);
    }

    #[test]
    fn test_get_on_non_mapping() {
        assert_eq!(ConfigNode::Int(1).get("x"), None);
    }
}
