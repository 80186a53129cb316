//! Scalar quoting for the event-pipeline target
//!
//! Type-driven literal forms, dispatched by pattern matching over the node
//! variants:
//!
//! - booleans render as the bare tokens `true`/`false`
//! - patterns render single-quoted, content verbatim (no escaping)
//! - atoms render bare
//! - sequences recurse, joined as `[ e1, e2 ]`
//! - everything else falls back to the debug-style quoted form
//!
//! The fallback for strings applies a double-backslash collapse after
//! escaping. The collapse looks redundant but downstream consumers were
//! built against output where `C:\path` stays `C:\path` inside the quotes,
//! so it must stay.

use polyconf_core::{ConfigNode, format_float};

/// Literal textual form of a node for `key => value` directives.
pub fn pipeline_literal(node: &ConfigNode) -> String {
    match node {
        ConfigNode::Sequence(items) => {
            let parts: Vec<String> = items.iter().map(pipeline_literal).collect();
            format!("[ {} ]", parts.join(", "))
        }
        ConfigNode::Pattern(src) => format!("'{src}'"),
        ConfigNode::Atom(name) => name.clone(),
        ConfigNode::Bool(b) => b.to_string(),
        ConfigNode::Int(i) => i.to_string(),
        ConfigNode::Float(f) => format_float(*f),
        ConfigNode::Null => "null".to_string(),
        ConfigNode::String(s) => inspect(s).replace("\\\\", "\\"),
        // Mappings have no directive-literal form; permissive fallback.
        ConfigNode::Mapping(_) => inspect(&node.to_display_string()),
    }
}

/// Debug-style textual form: double-quoted, control characters and
/// backslashes escaped.
pub fn inspect(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            '\x0b' => out.push_str("\\v"),
            '\0' => out.push_str("\\0"),
            '\x07' => out.push_str("\\a"),
            '\x08' => out.push_str("\\b"),
            '\x1b' => out.push_str("\\e"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
