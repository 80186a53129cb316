//! The line-oriented and delegating renderers
//!
//! Everything here takes a mapping at the root and produces the whole output
//! in one pass: flatline, YAML, JSON, Java properties, shell exports, INI,
//! HOCON and TOML. The structurally recursive formats (javastyle,
//! eventpipeline) live in their own modules.

use polyconf_core::{ConfigNode, deep_copy_mappings};

use crate::error::{RenderError, Result};
use crate::format::RenderOptions;
use crate::quote::inspect;

fn require_mapping<'a>(root: &'a ConfigNode, format: &str) -> Result<&'a polyconf_core::Map> {
    root.as_mapping()
        .ok_or_else(|| RenderError::structural(format!("{format} renderer requires a mapping at the root")))
}

/// Concatenate the strings under the reserved `lines` key, one per line,
/// with exactly one trailing newline.
pub fn flatline(root: &ConfigNode) -> Result<String> {
    require_mapping(root, "flatline")?;
    let lines = root
        .get("lines")
        .ok_or_else(|| RenderError::structural("flatline renderer requires a 'lines' key"))?;
    let items = lines
        .as_sequence()
        .ok_or_else(|| RenderError::structural("flatline 'lines' must be a sequence"))?;
    let joined: Vec<String> = items.iter().map(ConfigNode::to_display_string).collect();
    Ok(joined.join("\n") + "\n")
}

/// YAML text of the deep-mapping-normalized tree, trailing whitespace
/// stripped (and a leading `---\n` document marker, should the serializer
/// emit one).
pub fn yaml(root: &ConfigNode) -> Result<String> {
    require_mapping(root, "yaml")?;
    let copied = deep_copy_mappings(root);
    let text = serde_yaml::to_string(&copied)?;
    Ok(text.trim_start_matches("---\n").trim_end().to_string())
}

/// Pretty-printed JSON.
pub fn json(root: &ConfigNode) -> Result<String> {
    require_mapping(root, "json")?;
    Ok(serde_json::to_string_pretty(root)?)
}

/// One `key=value` pair per line, nested mappings flattened with dotted
/// keys, Java-properties escaping applied. Newline-joined, no trailing
/// newline.
pub fn properties(root: &ConfigNode, opts: &RenderOptions) -> Result<String> {
    let map = require_mapping(root, "properties")?;
    let mut lines = Vec::new();
    flatten_properties(map, &mut Vec::new(), &mut lines, 0, opts.max_depth)?;
    Ok(lines.join("\n"))
}

fn flatten_properties(
    map: &polyconf_core::Map,
    prefix: &mut Vec<String>,
    lines: &mut Vec<String>,
    depth: usize,
    max_depth: usize,
) -> Result<()> {
    if depth > max_depth {
        return Err(RenderError::RecursionLimit { depth });
    }
    for (k, v) in map {
        prefix.push(k.as_str().to_string());
        match v {
            ConfigNode::Mapping(inner) => {
                flatten_properties(inner, prefix, lines, depth + 1, max_depth)?;
            }
            other => {
                let key = escape_properties_key(&prefix.join("."));
                let value = escape_properties_value(&other.to_display_string());
                lines.push(format!("{key}={value}"));
            }
        }
        prefix.pop();
    }
    Ok(())
}

fn escape_properties_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for c in key.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ' ' => out.push_str("\\ "),
            '=' => out.push_str("\\="),
            ':' => out.push_str("\\:"),
            '#' => out.push_str("\\#"),
            '!' => out.push_str("\\!"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

fn escape_properties_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for (i, c) in value.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            // a leading space would be eaten by the loader
            ' ' if i == 0 => out.push_str("\\ "),
            c => out.push(c),
        }
    }
    out
}

/// One `export KEY=<value>` line per top-level entry, POSIX-quoted so the
/// line round-trips through a shell. Newline-joined, no trailing newline.
///
/// `exports` and `exports_raw` are aliases for the same output.
pub fn exports(root: &ConfigNode) -> Result<String> {
    let map = require_mapping(root, "exports")?;
    let lines: Vec<String> = map
        .iter()
        .map(|(k, v)| {
            format!(
                "export {}={}",
                k.as_str(),
                shell_words::quote(&v.to_display_string())
            )
        })
        .collect();
    Ok(lines.join("\n"))
}

/// `[section]` headers with raw `key=value` lines, sections separated by a
/// blank line. No escaping at all; values containing `\n` or `]` are the
/// caller's responsibility.
pub fn ini(root: &ConfigNode) -> Result<String> {
    let map = require_mapping(root, "ini")?;
    let mut sections = Vec::with_capacity(map.len());
    for (name, body) in map {
        let entries = body.as_mapping().ok_or_else(|| {
            RenderError::structural(format!("ini section '{name}' must be a mapping"))
        })?;
        let mut section = format!("[{name}]\n");
        let lines: Vec<String> = entries
            .iter()
            .map(|(k, v)| format!("{}={}", k.as_str(), v.to_display_string()))
            .collect();
        section.push_str(&lines.join("\n"));
        sections.push(section);
    }
    Ok(sections.join("\n\n"))
}

/// HOCON output: root braces, `key = value` leaves, nested `key { }`
/// objects. Expects a desymbolized tree (string keys only).
pub fn hocon(root: &ConfigNode, opts: &RenderOptions) -> Result<String> {
    require_mapping(root, "hocon")?;
    let mut out = String::from("{\n");
    hocon_body(root, 1, &mut out, opts)?;
    out.push('}');
    Ok(out)
}

fn hocon_body(
    node: &ConfigNode,
    level: usize,
    out: &mut String,
    opts: &RenderOptions,
) -> Result<()> {
    if level > opts.max_depth {
        return Err(RenderError::RecursionLimit { depth: level });
    }
    let map = node
        .as_mapping()
        .ok_or_else(|| RenderError::structural("hocon object body must be a mapping"))?;
    let indent = opts.indent.repeat(level);
    for (k, v) in map {
        let key = hocon_key(k.as_str());
        match v {
            ConfigNode::Mapping(_) => {
                out.push_str(&format!("{indent}{key} {{\n"));
                hocon_body(v, level + 1, out, opts)?;
                out.push_str(&format!("{indent}}}\n"));
            }
            other => {
                out.push_str(&format!("{indent}{key} = {}\n", hocon_value(other)));
            }
        }
    }
    Ok(())
}

fn hocon_key(key: &str) -> String {
    let unquoted = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if unquoted {
        key.to_string()
    } else {
        inspect(key)
    }
}

fn hocon_value(node: &ConfigNode) -> String {
    match node {
        ConfigNode::Null => "null".to_string(),
        ConfigNode::Bool(b) => b.to_string(),
        ConfigNode::Int(i) => i.to_string(),
        ConfigNode::Float(f) => polyconf_core::format_float(*f),
        ConfigNode::String(s) | ConfigNode::Atom(s) | ConfigNode::Pattern(s) => inspect(s),
        ConfigNode::Sequence(items) => {
            let parts: Vec<String> = items.iter().map(hocon_value).collect();
            format!("[ {} ]", parts.join(", "))
        }
        // reachable only for mappings inside sequences; HOCON allows
        // inline objects there
        ConfigNode::Mapping(map) => {
            let parts: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{} = {}", hocon_key(k.as_str()), hocon_value(v)))
                .collect();
            format!("{{ {} }}", parts.join(", "))
        }
    }
}

/// TOML via the `toml` serializer. Expects a desymbolized tree.
pub fn toml(root: &ConfigNode) -> Result<String> {
    require_mapping(root, "toml")?;
    Ok(::toml::to_string_pretty(root)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyconf_core::{Key, Map};

    fn opts() -> RenderOptions {
        RenderOptions::default()
    }

    #[test]
    fn test_flatline_trailing_newline() {
        let root = ConfigNode::from_yaml("lines:\n  - a\n  - b\n").unwrap();
        assert_eq!(flatline(&root).unwrap(), "a\nb\n");
    }

    #[test]
    fn test_flatline_missing_lines() {
        let root = ConfigNode::from_yaml("other: 1\n").unwrap();
        assert!(matches!(
            flatline(&root),
            Err(RenderError::Structural { .. })
        ));
    }

    #[test]
    fn test_flatline_non_sequence_lines() {
        let root = ConfigNode::from_yaml("lines: nope\n").unwrap();
        assert!(matches!(
            flatline(&root),
            Err(RenderError::Structural { .. })
        ));
    }

    #[test]
    fn test_yaml_stripped() {
        let root = ConfigNode::from_yaml("a:\n  b: 1\n").unwrap();
        let out = yaml(&root).unwrap();
        assert_eq!(out, "a:\n  b: 1");
        assert!(!out.ends_with('\n'));
    }

    #[test]
    fn test_json_pretty() {
        let root = ConfigNode::from_yaml("a: 1\n").unwrap();
        assert_eq!(json(&root).unwrap(), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_properties_dotted_keys() {
        let root = ConfigNode::from_yaml("db:\n  host: localhost\n  port: 5432\ndebug: true\n")
            .unwrap();
        assert_eq!(
            properties(&root, &opts()).unwrap(),
            "db.host=localhost\ndb.port=5432\ndebug=true"
        );
    }

    #[test]
    fn test_properties_escaping() {
        let mut map = Map::new();
        map.insert(Key::Str("key with spaces".into()), ConfigNode::from(" v=1\n"));
        assert_eq!(
            properties(&ConfigNode::Mapping(map), &opts()).unwrap(),
            "key\\ with\\ spaces=\\ v=1\\n"
        );
    }

    #[test]
    fn test_exports_plain() {
        let root = ConfigNode::from_yaml("PATH: /usr/bin\nPORT: 8080\n").unwrap();
        assert_eq!(
            exports(&root).unwrap(),
            "export PATH=/usr/bin\nexport PORT=8080"
        );
    }

    #[test]
    fn test_exports_round_trip() {
        let tricky = "has spaces, a ' quote and a \"double\" $HOME";
        let mut map = Map::new();
        map.insert(Key::Str("VAR".into()), ConfigNode::from(tricky));
        let out = exports(&ConfigNode::Mapping(map)).unwrap();
        let assignment = out.strip_prefix("export VAR=").unwrap();
        let words = shell_words::split(assignment).unwrap();
        assert_eq!(words, vec![tricky.to_string()]);
    }

    #[test]
    fn test_ini_sections() {
        let root = ConfigNode::from_yaml("A:\n  x: 1\nB:\n  y: 2\n").unwrap();
        assert_eq!(ini(&root).unwrap(), "[A]\nx=1\n\n[B]\ny=2");
    }

    #[test]
    fn test_ini_non_mapping_section() {
        let root = ConfigNode::from_yaml("A: not-a-section\n").unwrap();
        assert!(matches!(ini(&root), Err(RenderError::Structural { .. })));
    }

    #[test]
    fn test_hocon_nested() {
        let root = ConfigNode::from_yaml("server:\n  port: 8080\n  host: example.org\nname: app\n")
            .unwrap();
        assert_eq!(
            hocon(&root, &opts()).unwrap(),
            "{\n  server {\n    port = 8080\n    host = \"example.org\"\n  }\n  name = \"app\"\n}"
        );
    }

    #[test]
    fn test_hocon_quotes_awkward_keys() {
        let root = ConfigNode::from_yaml("\"a.b\": 1\n").unwrap();
        assert_eq!(hocon(&root, &opts()).unwrap(), "{\n  \"a.b\" = 1\n}");
    }

    #[test]
    fn test_toml_delegation() {
        let root = ConfigNode::from_yaml("title: demo\nowner:\n  name: ops\n").unwrap();
        let out = toml(&root).unwrap();
        assert!(out.contains("title = \"demo\""));
        assert!(out.contains("[owner]"));
        assert!(out.contains("name = \"ops\""));
    }

    #[test]
    fn test_mapping_required_at_root() {
        let root = ConfigNode::from("scalar");
        for result in [
            yaml(&root),
            json(&root),
            exports(&root),
            ini(&root),
            hocon(&root, &opts()),
            toml(&root),
            properties(&root, &opts()),
        ] {
            assert!(matches!(result, Err(RenderError::Structural { .. })));
        }
    }
}
