//! CLI error types

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// Input could not be read or parsed
    #[error("Input error: {message}")]
    #[diagnostic(code(polyconf::cli::input))]
    Input {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Rendering failed
    #[error("Render error: {message}")]
    #[diagnostic(code(polyconf::cli::render))]
    Render {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl From<polyconf_core::CoreError> for CliError {
    fn from(err: polyconf_core::CoreError) -> Self {
        CliError::Input {
            message: err.to_string(),
            help: Some("the input must be a YAML or JSON document".to_string()),
        }
    }
}

impl From<polyconf_render::RenderError> for CliError {
    fn from(err: polyconf_render::RenderError) -> Self {
        let help = match &err {
            polyconf_render::RenderError::UnsupportedFormat { .. } => {
                Some("run 'polyconf formats' to list the supported selectors".to_string())
            }
            polyconf_render::RenderError::Structural { .. } => {
                Some("check the input tree against the selected format's shape".to_string())
            }
            _ => None,
        };
        CliError::Render {
            message: err.to_string(),
            help,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Input {
            message: err.to_string(),
            help: None,
        }
    }
}
