//! CLI argument definitions.

use crate::params::Format;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Validate and normalize radiomics feature extraction parameter files.
#[derive(Debug, Parser)]
#[command(name = "radparams")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Only log warnings and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate a parameter file.
    Check {
        /// Input options.
        #[command(flatten)]
        input: InputArgs,
    },
    /// Print a parameter file with all defaults filled in.
    Show {
        /// Input options.
        #[command(flatten)]
        input: InputArgs,

        /// Output format (yaml, json, toml).
        #[arg(long, default_value = "yaml")]
        to: Format,
    },
    /// Print the default extraction settings.
    Defaults {
        /// Output format (yaml, json, toml).
        #[arg(long, default_value = "yaml")]
        to: Format,
    },
}

/// Arguments selecting the parameter file to read.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Parameter file (default: params.yaml in the platform config directory).
    pub file: Option<PathBuf>,

    /// Input format, overriding detection from the file extension.
    #[arg(short, long, env = "RADPARAMS_FORMAT")]
    pub format: Option<Format>,
}
