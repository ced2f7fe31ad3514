use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Analyze Minecraft mod sources for side/environment problems
#[derive(Parser)]
#[command(name = "sidelint")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run all checks on a mod module
    Check {
        /// Path to the module root
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short = 'f', long = "format", value_enum, default_value = "text")]
        format: OutputFormat,

        /// Apply available quick-fixes (e.g. register unused mixins in their
        /// config) and re-check
        #[arg(long)]
        fix: bool,
    },
    /// Show the resolved side of every class and annotated member
    Sides {
        /// Path to the module root
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Only show classes whose qualified name matches this regex
        #[arg(short = 'F', long = "filter")]
        filter: Option<String>,

        /// Output format
        #[arg(short = 'f', long = "format", value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Show the detected modding-platform facet of a module
    Facets {
        /// Path to the module root
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short = 'f', long = "format", value_enum, default_value = "text")]
        format: OutputFormat,
    },
}
