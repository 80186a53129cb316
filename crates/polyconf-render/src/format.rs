//! Format selection and the single rendering entry point

use std::fmt;
use std::str::FromStr;

use polyconf_core::{ConfigNode, normalize};

use crate::error::{RenderError, Result};
use crate::{javastyle, pipeline, simple};

/// The output format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Flatline,
    Yaml,
    Json,
    Properties,
    Hocon,
    Toml,
    Ini,
    Javastyle,
    Exports,
    ExportsRaw,
    Eventpipeline,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 11] = [
        OutputFormat::Flatline,
        OutputFormat::Yaml,
        OutputFormat::Json,
        OutputFormat::Properties,
        OutputFormat::Hocon,
        OutputFormat::Toml,
        OutputFormat::Ini,
        OutputFormat::Javastyle,
        OutputFormat::Exports,
        OutputFormat::ExportsRaw,
        OutputFormat::Eventpipeline,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Flatline => "flatline",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Json => "json",
            OutputFormat::Properties => "properties",
            OutputFormat::Hocon => "hocon",
            OutputFormat::Toml => "toml",
            OutputFormat::Ini => "ini",
            OutputFormat::Javastyle => "javastyle",
            OutputFormat::Exports => "exports",
            OutputFormat::ExportsRaw => "exports_raw",
            OutputFormat::Eventpipeline => "eventpipeline",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self> {
        OutputFormat::ALL
            .iter()
            .find(|fmt| fmt.name() == s)
            .copied()
            .ok_or_else(|| RenderError::UnsupportedFormat {
                name: s.to_string(),
            })
    }
}

/// Per-invocation rendering options.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Indent unit for the block formats (javastyle, hocon, eventpipeline).
    pub indent: String,
    /// Recursion guard against pathologically deep trees.
    pub max_depth: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            max_depth: 128,
        }
    }
}

/// Render a configuration tree into the selected format.
///
/// Pure and deterministic: the same tree and format always produce
/// byte-identical output. The tree is desymbolized first for the formats
/// whose serializers require string keys (HOCON, TOML).
pub fn render(format: OutputFormat, root: &ConfigNode, opts: &RenderOptions) -> Result<String> {
    tracing::debug!(format = %format, "rendering configuration tree");
    match format {
        OutputFormat::Flatline => simple::flatline(root),
        OutputFormat::Yaml => simple::yaml(root),
        OutputFormat::Json => simple::json(root),
        OutputFormat::Properties => simple::properties(root, opts),
        OutputFormat::Hocon => simple::hocon(&normalize(root), opts),
        OutputFormat::Toml => simple::toml(&normalize(root)),
        OutputFormat::Ini => simple::ini(root),
        OutputFormat::Javastyle => javastyle::javastyle(root, opts),
        OutputFormat::Exports | OutputFormat::ExportsRaw => simple::exports(root),
        OutputFormat::Eventpipeline => pipeline::eventpipeline(root, opts),
    }
}
