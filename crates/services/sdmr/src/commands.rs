//! Command handlers for the SDM Runner.
//!
//! Contains handler functions for the CLI commands:
//! - Configuration parsing and display
//! - Running every goal or a single goal

use std::io::stdout;

use crate::goal_run::{run_all, run_goal};
use crate::logs::{dump_logs, dump_logs_to_temporary_file};
use crate::machine::Machine;
use crate::prelude::*;
use crate::run_output::GoalRunOutput;

/// Handles the parse command to display configuration information.
pub async fn handle_parse(machine: &Machine) -> Result<()> {
    let config = &machine.config;

    println!("Configuration parsed successfully");
    println!("Global version: {}", config.global.version);
    println!("Number of goals: {}", config.goals.len());

    for (goal_idx, goal) in config.goals.iter().enumerate() {
        println!("\nGoal {}: {}", goal_idx + 1, goal.name);
        println!("  Description: {}", goal.description);
        println!("  Commands: {}", goal.commands.len());

        for (command_idx, command) in goal.commands.iter().enumerate() {
            println!(
                "    Command {}: {} {}",
                command_idx + 1,
                command.program,
                command.args.join(" ")
            );
        }
    }

    Ok(())
}

/// Handles the validate command: run every goal in declaration order.
///
/// On failure the collected logs are also written to a temporary file,
/// with ANSI escapes stripped, for later inspection.
pub async fn handle_validate(machine: &Machine) -> Result<()> {
    println!("Validating configuration file: {:?}", machine.config_path);

    let mut output = GoalRunOutput::new(&machine.config);
    let result = run_all(machine, &mut output).await;
    if result.is_err() {
        dump_logs_to_temporary_file(&output)?;
    }
    dump_logs(&output, stdout())?;
    result
}

/// Handles the run command: run a single goal by name and print its
/// aggregate report.
pub async fn handle_run_goal(machine: &Machine, name: &str) -> Result<()> {
    let goal = machine
        .config
        .goals
        .iter()
        .find(|goal| goal.name == name)
        .ok_or_else(|| Error::UnknownGoal(name.to_string()))?;

    let mut output = GoalRunOutput::new(&machine.config);
    let result = run_goal(machine, goal, &mut output).await;

    if let Some(outcome) = output.outcomes.get(&goal.id) {
        println!("{}", outcome.aggregate_message);
    }
    result
}
