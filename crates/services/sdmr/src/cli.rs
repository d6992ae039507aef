//! Command-line interface for the SDM Runner.
//!
//! Defines the CLI structure and commands for sdmr.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface for the SDM Runner.
#[derive(Parser)]
#[command(name = "sdmr")]
#[command(about = "SDM Runner - run configured delivery goals locally")]
pub struct Cli {
    /// Path to the goal configuration file
    #[arg(short, long)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for the SDM Runner.
#[derive(Subcommand)]
pub enum Commands {
    /// Parse and display the configuration file
    Parse,
    /// Run every goal in declaration order
    Validate,
    /// Run a single goal by name
    Run {
        /// Goal name as declared in the configuration
        #[arg(short, long)]
        goal: String,
    },
}
