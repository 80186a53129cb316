//! Tree normalization
//!
//! Two passes run before rendering:
//!
//! - [`normalize`] (desymbolization): every atom key becomes a string key and
//!   every atom value becomes a string value, recursively. Total over the
//!   node domain; anything else passes through unchanged.
//! - [`deep_copy_mappings`]: rebuilds the nested mapping spine with fresh
//!   maps so no structure is shared with the caller's tree. The YAML
//!   renderer uses this defensive copy before serialization.

use crate::node::{ConfigNode, Key, Map};

/// Convert all atom keys and atom values to their string form, recursively.
pub fn normalize(node: &ConfigNode) -> ConfigNode {
    match node {
        ConfigNode::Mapping(map) => {
            let mut out = Map::new();
            for (k, v) in map {
                out.insert(Key::Str(k.as_str().to_string()), normalize(v));
            }
            ConfigNode::Mapping(out)
        }
        ConfigNode::Sequence(items) => {
            ConfigNode::Sequence(items.iter().map(normalize).collect())
        }
        ConfigNode::Atom(name) => ConfigNode::String(name.clone()),
        other => other.clone(),
    }
}

/// Rebuild nested mappings into fresh maps, leaving keys and non-mapping
/// values as-is. Non-mapping input passes through unchanged.
pub fn deep_copy_mappings(node: &ConfigNode) -> ConfigNode {
    match node {
        ConfigNode::Mapping(map) => {
            let mut out = Map::new();
            for (k, v) in map {
                let value = if v.is_mapping() {
                    deep_copy_mappings(v)
                } else {
                    v.clone()
                };
                out.insert(k.clone(), value);
            }
            ConfigNode::Mapping(out)
        }
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_atom_keys_and_values() {
        let mut inner = Map::new();
        inner.insert(Key::Atom("level".into()), ConfigNode::atom("debug"));
        let mut map = Map::new();
        map.insert(Key::Atom("logging".into()), ConfigNode::Mapping(inner));
        map.insert(Key::Str("plain".into()), ConfigNode::Int(1));

        let normalized = normalize(&ConfigNode::Mapping(map));
        let outer = normalized.as_mapping().unwrap();
        assert!(outer.keys().all(|k| !k.is_atom()));
        assert_eq!(
            normalized.get("logging").unwrap().get("level"),
            Some(&ConfigNode::String("debug".into()))
        );
        assert_eq!(normalized.get("plain"), Some(&ConfigNode::Int(1)));
    }

    #[test]
    fn test_normalize_atoms_inside_sequences() {
        let node = ConfigNode::Sequence(vec![
            ConfigNode::atom("a"),
            ConfigNode::Int(2),
            ConfigNode::Sequence(vec![ConfigNode::atom("b")]),
        ]);
        assert_eq!(
            normalize(&node),
            ConfigNode::Sequence(vec![
                ConfigNode::String("a".into()),
                ConfigNode::Int(2),
                ConfigNode::Sequence(vec![ConfigNode::String("b".into())]),
            ])
        );
    }

    #[test]
    fn test_normalize_is_total_over_scalars() {
        assert_eq!(normalize(&ConfigNode::Null), ConfigNode::Null);
        assert_eq!(
            normalize(&ConfigNode::pattern("^x")),
            ConfigNode::pattern("^x")
        );
    }

    #[test]
    fn test_deep_copy_mappings_keeps_keys() {
        let node = ConfigNode::from_yaml("a:\n  b: 1\nc: [1, 2]\n").unwrap();
        let copied = deep_copy_mappings(&node);
        assert_eq!(copied, node);
    }

    #[test]
    fn test_deep_copy_mappings_passthrough() {
        assert_eq!(deep_copy_mappings(&ConfigNode::Int(3)), ConfigNode::Int(3));
    }
}
