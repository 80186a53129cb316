//! Event-pipeline renderer
//!
//! Generates the three-section (`input` / `filter` / `output`) block config
//! consumed by Logstash-style pipeline engines. Each section maps a
//! *discriminator* to named directive blocks:
//!
//! - a plain string discriminator tags `input` blocks with `type => "..."`
//!   and wraps `filter`/`output` blocks in `if [type] == "..." { }`
//! - a string starting with `if` or `else` is a conditional marker, emitted
//!   verbatim as a block opener
//! - an atom discriminator is purely structural: no wrapper, no tag
//!
//! The marker convention is a string-prefix match, not a grammar. No brace
//! validation is performed; a marker whose text carries unbalanced braces
//! produces unbalanced output. That permissiveness is the contract.

use once_cell::sync::Lazy;
use polyconf_core::{ConfigNode, Key, Map};
use regex::Regex;

use crate::error::{RenderError, Result};
use crate::format::RenderOptions;
use crate::quote::{inspect, pipeline_literal};

static CONDITIONAL_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new("^(if|else)").expect("marker regex"));

fn is_marker(s: &str) -> bool {
    CONDITIONAL_MARKER.is_match(s)
}

fn quote_str(s: &str) -> String {
    inspect(s).replace("\\\\", "\\")
}

pub fn eventpipeline(root: &ConfigNode, opts: &RenderOptions) -> Result<String> {
    root.as_mapping().ok_or_else(|| {
        RenderError::structural("eventpipeline renderer requires a mapping at the root")
    })?;

    let mut lines: Vec<String> = Vec::new();
    render_input(section(root, "input")?, &mut lines, opts)?;
    render_filter(section(root, "filter")?, &mut lines, opts)?;
    render_output(section(root, "output")?, &mut lines, opts)?;

    Ok(collapse_blank_lines(&lines.join("\n")))
}

fn section<'a>(root: &'a ConfigNode, name: &str) -> Result<&'a Map> {
    root.get(name)
        .ok_or_else(|| RenderError::structural(format!("eventpipeline input missing '{name}' section")))?
        .as_mapping()
        .ok_or_else(|| RenderError::structural(format!("eventpipeline '{name}' section must be a mapping")))
}

fn directive_map<'a>(node: &'a ConfigNode, context: &str) -> Result<&'a Map> {
    node.as_mapping()
        .ok_or_else(|| RenderError::structural(format!("eventpipeline {context} must be a mapping")))
}

fn render_input(map: &Map, lines: &mut Vec<String>, opts: &RenderOptions) -> Result<()> {
    let i1 = opts.indent.repeat(1);
    let i2 = opts.indent.repeat(2);
    lines.push("input {".to_string());
    for (disc, blocks) in map {
        let blocks = directive_map(blocks, "input block set")?;
        for (name, config) in blocks {
            let config = directive_map(config, "input block")?;
            lines.push(format!("{i1}{name} {{"));
            for (k, v) in config {
                lines.push(format!("{i2}{k} => {}", pipeline_literal(v)));
            }
            if let Key::Str(s) = disc {
                lines.push(format!("{i2}type => {}", quote_str(s)));
            }
            lines.push(format!("{i1}}}"));
        }
    }
    lines.push("}".to_string());
    Ok(())
}

fn render_filter(map: &Map, lines: &mut Vec<String>, opts: &RenderOptions) -> Result<()> {
    let i1 = opts.indent.repeat(1);
    lines.push("filter {".to_string());
    for (disc, blocks) in map {
        let blocks = directive_map(blocks, "filter block set")?;
        // the filter section trims string discriminators before matching
        let opened = match disc {
            Key::Str(s) => {
                let trimmed = s.trim();
                if is_marker(trimmed) {
                    lines.push(format!("{i1}{trimmed} {{"));
                } else {
                    lines.push(format!("{i1}if [type] == {} {{", quote_str(trimmed)));
                }
                true
            }
            Key::Atom(_) => false,
        };
        let base = if opened { 2 } else { 1 };
        let ind = opts.indent.repeat(base);
        let ind1 = opts.indent.repeat(base + 1);
        let ind2 = opts.indent.repeat(base + 2);
        for (name, config) in blocks {
            match name {
                Key::Str(s) if is_marker(s) => {
                    // nested conditional: directives with mapping values
                    // become second-level blocks, scalars plain lines
                    let cfg = directive_map(config, "filter conditional block")?;
                    lines.push(format!("{ind}{s} {{"));
                    for (k, v) in cfg {
                        if let Some(inner) = v.as_mapping() {
                            lines.push(format!("{ind1}{k} {{"));
                            for (k2, v2) in inner {
                                lines.push(format!("{ind2}{k2} => {}", pipeline_literal(v2)));
                            }
                            lines.push(format!("{ind1}}}"));
                        } else {
                            lines.push(format!("{ind1}{k} => {}", pipeline_literal(v)));
                        }
                    }
                    lines.push(format!("{ind}}}"));
                }
                Key::Str(s) => {
                    let cfg = directive_map(config, "filter block")?;
                    lines.push(format!("{ind}{s} {{"));
                    for (k, v) in cfg {
                        lines.push(format!("{ind1}{k} => {}", pipeline_literal(v)));
                    }
                    lines.push(format!("{ind}}}"));
                }
                // bare filter invocation: only the quoted value appears
                Key::Atom(_) => {
                    lines.push(format!("{ind}{}", pipeline_literal(config)));
                }
            }
        }
        if opened {
            lines.push(format!("{i1}}}"));
        }
    }
    lines.push("}".to_string());
    Ok(())
}

fn render_output(map: &Map, lines: &mut Vec<String>, opts: &RenderOptions) -> Result<()> {
    let i1 = opts.indent.repeat(1);
    lines.push("output {".to_string());
    for (disc, blocks) in map {
        let blocks = directive_map(blocks, "output block set")?;
        let opened = match disc {
            Key::Str(s) => {
                if is_marker(s) {
                    lines.push(format!("{i1}{s} {{"));
                } else {
                    lines.push(format!("{i1}if [type] == {} {{", quote_str(s)));
                }
                true
            }
            Key::Atom(_) => false,
        };
        let base = if opened { 2 } else { 1 };
        let ind = opts.indent.repeat(base);
        let ind1 = opts.indent.repeat(base + 1);
        for (name, config) in blocks {
            let cfg = directive_map(config, "output block")?;
            lines.push(format!("{ind}{name} {{"));
            for (k, v) in cfg {
                lines.push(format!("{ind1}{k} => {}", pipeline_literal(v)));
            }
            lines.push(format!("{ind}}}"));
        }
        if opened {
            lines.push(format!("{i1}}}"));
        }
    }
    lines.push("}".to_string());
    Ok(())
}

/// Collapse every run of two or more newlines (with any whitespace-only
/// line content in between) to a single newline.
///
/// Matches the backtracking behavior of `gsub(/(\n\s*)+?\n/, "\n")`:
/// interior whitespace of the run is dropped, while horizontal whitespace
/// after the run's last newline (the next line's indentation) survives.
pub fn collapse_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('\n') {
        out.push_str(&rest[..pos]);
        out.push('\n');
        let bytes = rest.as_bytes();
        let mut end = pos + 1;
        let mut probe = pos + 1;
        loop {
            let mut k = probe;
            while k < bytes.len() && matches!(bytes[k], b' ' | b'\t' | b'\r' | 0x0b | 0x0c) {
                k += 1;
            }
            if k < bytes.len() && bytes[k] == b'\n' {
                end = k + 1;
                probe = k + 1;
            } else {
                break;
            }
        }
        rest = &rest[end..];
    }
    out.push_str(rest);
    out
}
