//! Java-style nested block renderer
//!
//! Mappings become `key { ... }` blocks, everything else `key = value`
//! lines. Two non-obvious rules downstream parsers depend on:
//!
//! - the last entry of every mapping has all trailing whitespace stripped,
//!   including the newline a nested block would otherwise leave behind
//! - scalar values use this renderer's own debug-style fallback, not the
//!   event-pipeline quoting (no backslash collapse here)

use polyconf_core::{ConfigNode, format_float};

use crate::error::{RenderError, Result};
use crate::format::RenderOptions;
use crate::quote::inspect;

pub fn javastyle(root: &ConfigNode, opts: &RenderOptions) -> Result<String> {
    render_node(root, 0, 0, opts)
}

fn render_node(
    node: &ConfigNode,
    level: usize,
    depth: usize,
    opts: &RenderOptions,
) -> Result<String> {
    if depth > opts.max_depth {
        return Err(RenderError::RecursionLimit { depth });
    }
    match node {
        ConfigNode::Mapping(map) => {
            let indent = opts.indent.repeat(level);
            let len = map.len();
            let mut entries = Vec::with_capacity(len);
            for (i, (k, v)) in map.iter().enumerate() {
                let mut entry = if v.is_mapping() {
                    format!(
                        "{indent}{k} {{\n{}\n{indent}}}\n",
                        render_node(v, level + 1, depth + 1, opts)?
                    )
                } else {
                    // value position restarts at indent level zero; only
                    // sequence elements pick indentation back up
                    format!("{indent}{k} = {}", render_node(v, 0, depth + 1, opts)?)
                };
                if i == len - 1 {
                    entry.truncate(entry.trim_end().len());
                }
                entries.push(entry);
            }
            Ok(entries.join("\n"))
        }
        ConfigNode::Sequence(items) => {
            let parts = items
                .iter()
                .map(|item| render_node(item, level + 1, depth + 1, opts))
                .collect::<Result<Vec<_>>>()?;
            Ok(format!("[ {} ]", parts.join(", ")))
        }
        ConfigNode::Atom(name) => Ok(name.clone()),
        other => Ok(java_literal(other)),
    }
}

fn java_literal(node: &ConfigNode) -> String {
    match node {
        ConfigNode::Null => "null".to_string(),
        ConfigNode::Bool(b) => b.to_string(),
        ConfigNode::Int(i) => i.to_string(),
        ConfigNode::Float(f) => format_float(*f),
        ConfigNode::String(s) => inspect(s),
        ConfigNode::Pattern(src) => format!("/{src}/"),
        // atoms, sequences and mappings are handled by the caller
        other => inspect(&other.to_display_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyconf_core::{Key, Map};

    fn render(root: &ConfigNode) -> String {
        javastyle(root, &RenderOptions::default()).unwrap()
    }

    #[test]
    fn test_simple_nesting() {
        let root = ConfigNode::from_yaml("a:\n  b: 1\n  c: 2\n").unwrap();
        assert_eq!(render(&root), "a {\n  b = 1\n  c = 2\n}");
    }

    #[test]
    fn test_two_levels() {
        let root = ConfigNode::from_yaml("a:\n  b:\n    c: 1\n").unwrap();
        assert_eq!(render(&root), "a {\n  b {\n    c = 1\n  }\n}");
    }

    #[test]
    fn test_block_before_scalar_leaves_blank_line() {
        // non-final nested blocks keep their trailing newline; only the
        // mapping's last entry is stripped
        let root = ConfigNode::from_yaml("a:\n  b: 1\nx: 2\n").unwrap();
        assert_eq!(render(&root), "a {\n  b = 1\n}\n\nx = 2");
    }

    #[test]
    fn test_string_values_inspected() {
        let root = ConfigNode::from_yaml("greeting: hello world\n").unwrap();
        assert_eq!(render(&root), "greeting = \"hello world\"");
    }

    #[test]
    fn test_string_backslashes_stay_escaped() {
        let mut map = Map::new();
        map.insert(Key::Str("path".into()), ConfigNode::from(r"C:\logs"));
        assert_eq!(render(&ConfigNode::Mapping(map)), "path = \"C:\\\\logs\"");
    }

    #[test]
    fn test_atom_bare() {
        let mut map = Map::new();
        map.insert(Key::Str("mode".into()), ConfigNode::atom("DEBUG"));
        assert_eq!(render(&ConfigNode::Mapping(map)), "mode = DEBUG");
    }

    #[test]
    fn test_sequence_value() {
        let root = ConfigNode::from_yaml("ports: [80, 443]\n").unwrap();
        assert_eq!(render(&root), "ports = [ 80, 443 ]");
    }

    #[test]
    fn test_scalar_types() {
        let root = ConfigNode::from_yaml("b: true\nf: 1.5\ni: 9\nn: null\n").unwrap();
        assert_eq!(render(&root), "b = true\nf = 1.5\ni = 9\nn = null");
    }

    #[test]
    fn test_custom_indent() {
        let opts = RenderOptions {
            indent: "    ".to_string(),
            ..RenderOptions::default()
        };
        let root = ConfigNode::from_yaml("a:\n  b: 1\n").unwrap();
        assert_eq!(
            javastyle(&root, &opts).unwrap(),
            "a {\n    b = 1\n}"
        );
    }

    #[test]
    fn test_recursion_limit() {
        let mut node = ConfigNode::from(1);
        for _ in 0..40 {
            let mut map = Map::new();
            map.insert(Key::Str("n".into()), node);
            node = ConfigNode::Mapping(map);
        }
        let opts = RenderOptions {
            max_depth: 16,
            ..RenderOptions::default()
        };
        assert!(matches!(
            javastyle(&node, &opts),
            Err(RenderError::RecursionLimit { .. })
        ));
    }
}
