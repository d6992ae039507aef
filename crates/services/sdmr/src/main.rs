//! SDM Runner (sdmr)
//!
//! A local runner for declarative delivery goals. Each goal is an ordered
//! batch of external commands (build, test, package) declared in a TOML
//! configuration file; the runner executes a goal's commands one at a
//! time, stops at the first failure, and reports per-goal logs and an
//! aggregate outcome. The runner can:
//!
//! - **Parse**: Parse and display a goal configuration
//! - **Validate**: Run every configured goal in declaration order
//! - **Run**: Run a single goal by name

mod cli;
mod commands;
mod error;
mod goal_run;
mod logs;
mod machine;
mod prelude;
mod run_output;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{handle_parse, handle_run_goal, handle_validate};
use crate::machine::Machine;
use crate::prelude::*;

/// Main entry point for the SDM Runner.
///
/// Initializes logging, parses command line arguments, loads the goal
/// configuration, and dispatches to the appropriate command handler.
///
/// # Examples
///
/// ```bash
/// # Parse a goal configuration
/// sdmr --config goals.toml parse
///
/// # Run every goal
/// sdmr --config goals.toml validate
///
/// # Run one goal
/// sdmr --config goals.toml run --goal site-build
/// ```
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sdmr=info,sdm_io=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let machine = Machine::create(cli.config)?;

    match cli.command {
        Commands::Parse => handle_parse(&machine).await,
        Commands::Validate => handle_validate(&machine).await,
        Commands::Run { goal } => handle_run_goal(&machine, &goal).await,
    }
}
