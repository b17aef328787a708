//! CLI argument definitions for the scoped-model binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Replay content-model operations from a script
#[derive(Parser, Debug)]
#[command(name = "scoped-model")]
#[command(about = "scoped-model: drive a hierarchical content model from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a script against a fresh model and print the results
    Run(RunArgs),
    /// Parse a script without running it
    Check(CheckArgs),
}

/// Arguments for the run command
#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Script of model operations, one per line
    #[arg(short, long, env = "SCOPED_MODEL_SCRIPT")]
    pub script: PathBuf,

    /// JSON object loaded as the root scope's data
    #[arg(short, long, env = "SCOPED_MODEL_DATA")]
    pub data: Option<PathBuf>,

    /// JSON model configuration
    #[arg(short, long, env = "SCOPED_MODEL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Pretty-print JSON output (overrides the config file)
    #[arg(long)]
    pub pretty: bool,
}

/// Arguments for the check command
#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Script to parse
    #[arg(short, long, env = "SCOPED_MODEL_SCRIPT")]
    pub script: PathBuf,
}
