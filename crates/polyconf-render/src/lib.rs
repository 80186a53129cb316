//! Polyconf Render - Multi-format configuration rendering
//!
//! Pure transformations from a [`polyconf_core::ConfigNode`] tree into the
//! textual representations expected by downstream consumers:
//! - line-oriented: flatline, properties, exports, ini
//! - delegating: yaml, json, toml
//! - structural: hocon, javastyle, eventpipeline
//!
//! All renderers are synchronous, side-effect-free and deterministic; they
//! may run concurrently without coordination.

pub mod error;
pub mod format;
pub mod javastyle;
pub mod pipeline;
pub mod quote;
pub mod simple;

pub use error::{RenderError, Result};
pub use format::{OutputFormat, RenderOptions, render};
pub use quote::pipeline_literal;
