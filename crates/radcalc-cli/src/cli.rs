use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Recompute clinical calculator results as JSON documents
#[derive(Debug, Parser)]
#[command(name = "radcalc")]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (default: $RADCALC_CONFIG_PATH, then ./radcalc.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print JSON on a single line
    #[arg(long, global = true)]
    pub compact: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate one calculator against positional arguments
    Evaluate {
        /// Reject unrecognized category values instead of using the default
        #[arg(long)]
        strict_categories: bool,

        /// Calculator identifier (case-insensitive)
        calculator: String,

        /// Arguments in the calculator's parameter order
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// List every calculator with its parameter schema
    List,

    /// Evaluate a JSON array of cases from a file
    Batch {
        /// Reject unrecognized category values instead of using the default
        #[arg(long)]
        strict_categories: bool,

        /// Path to the case file
        file: PathBuf,
    },
}
