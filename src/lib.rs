//! radparams - radiomics extraction parameter loader.
//!
//! Parses parameter documents for an external texture feature extraction
//! engine, validates them against a fixed schema, and produces an immutable
//! [`params::ParameterDocument`].

#![warn(missing_docs)]

pub mod cli;
pub mod constants;
pub mod engine;
pub mod error;
pub mod params;

use clap::Parser;
use cli::{Cli, Command, InputArgs};
use params::{ExtractionSettings, ParameterDocument};
use std::path::PathBuf;
use tracing::info;

pub use error::{Error, Result};
pub use params::{load, load_with_format};

/// Main entry point for the radparams CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Check { input } => {
            let (path, doc) = load_input(&input)?;
            println!("{}: OK ({})", path.display(), summarize(&doc));
            Ok(())
        }
        Command::Show { input, to } => {
            let (_, doc) = load_input(&input)?;
            print!("{}", params::render(&doc, to)?);
            Ok(())
        }
        Command::Defaults { to } => {
            let settings = serde_json::to_value(ExtractionSettings::default()).map_err(|e| {
                Error::Render {
                    format: to,
                    reason: e.to_string(),
                }
            })?;
            let mut root = serde_json::Map::new();
            root.insert(constants::sections::SETTING.to_string(), settings);
            print!(
                "{}",
                params::render_value(&serde_json::Value::Object(root), to)?
            );
            Ok(())
        }
    }
}

/// Resolve and load the parameter file named by the input arguments.
fn load_input(input: &InputArgs) -> Result<(PathBuf, ParameterDocument)> {
    let path = match &input.file {
        Some(path) => path.clone(),
        None => params::default_params_path()?,
    };

    let doc = match input.format {
        Some(format) => params::load_file_as(&path, format)?,
        None => params::load_file(&path)?,
    };

    info!(
        "Loaded {} with {} image type(s) and {} feature class(es)",
        path.display(),
        doc.image_types().len(),
        doc.feature_classes().len()
    );

    Ok((path, doc))
}

/// One-line description of the enabled image types and feature classes.
fn summarize(doc: &ParameterDocument) -> String {
    let image_types = doc
        .image_types()
        .keys()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    let classes = doc
        .enabled_classes()
        .map(params::FeatureClass::as_str)
        .collect::<Vec<_>>()
        .join(",");
    format!("imageType=[{image_types}] featureClass=[{classes}]")
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    // Logs go to stderr so `show` output can be piped.
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
