//! Polyconf CLI - render configuration trees into downstream formats

use clap::{Parser, Subcommand};
use miette::Result;
use std::io::Read;
use std::path::{Path, PathBuf};

use polyconf_core::ConfigNode;
use polyconf_render::{OutputFormat, RenderOptions, render};

mod error;

use error::CliError;

#[derive(Parser)]
#[command(name = "polyconf")]
#[command(author = "Polyconf Contributors")]
#[command(version)]
#[command(about = "Multi-format configuration renderer", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a configuration tree into a target format
    Render {
        /// Output format selector (see 'polyconf formats')
        #[arg(short, long)]
        format: String,

        /// Indent width in spaces for the block formats
        #[arg(long, default_value_t = 2)]
        indent: usize,

        /// Input file (YAML; JSON is accepted too). Reads stdin when omitted
        file: Option<PathBuf>,
    },

    /// List the supported output formats
    Formats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
    }

    match cli.command {
        Commands::Render {
            format,
            indent,
            file,
        } => {
            let output = run_render(&format, indent, file.as_deref())?;
            println!("{output}");
        }
        Commands::Formats => {
            for fmt in OutputFormat::ALL {
                println!("{fmt}");
            }
        }
    }

    Ok(())
}

fn run_render(format: &str, indent: usize, file: Option<&Path>) -> Result<String, CliError> {
    let format: OutputFormat = format.parse().map_err(CliError::from)?;

    let text = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let root = ConfigNode::from_yaml(&text)?;
    let opts = RenderOptions {
        indent: " ".repeat(indent),
        ..RenderOptions::default()
    };
    Ok(render(format, &root, &opts)?)
}
