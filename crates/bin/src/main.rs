use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod script;

use cli::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("scoped_model=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => commands::run::run(&args),
        Commands::Check(args) => commands::check::run(&args),
    }
}
