//! Renderer error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    /// The input tree violates the selected renderer's shape assumptions.
    /// Raised immediately; no partial output is ever produced.
    #[error("Structural error: {message}")]
    Structural { message: String },

    /// The tree is deeper than `RenderOptions::max_depth`.
    #[error("Recursion limit exceeded at depth {depth}")]
    RecursionLimit { depth: usize },

    #[error("Unsupported format: {name}")]
    UnsupportedFormat { name: String },

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialization error: {0}")]
    Toml(#[from] toml::ser::Error),
}

impl RenderError {
    pub fn structural(message: impl Into<String>) -> Self {
        RenderError::Structural {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;
