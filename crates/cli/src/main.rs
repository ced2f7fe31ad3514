use anyhow::Result;
use clap::Parser;

use sidelint::cli::{Cli, Commands};
use sidelint::commands;

fn main() -> Result<()> {
    // Initialize tracing based on RUST_LOG env var
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let exit_code = match cli.command {
        Commands::Check { path, format, fix } => commands::check::run(&path, format, fix)?,
        Commands::Sides {
            path,
            filter,
            format,
        } => commands::sides::run(&path, filter.as_deref(), format)?,
        Commands::Facets { path, format } => commands::facets::run(&path, format)?,
    };
    std::process::exit(exit_code);
}
