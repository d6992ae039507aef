//! Goal execution for the SDM Runner.
//!
//! Runs each goal's command batch through the batch runner:
//!
//! 1. Merges goal-level defaults over the global defaults
//! 2. Converts configured command entries into command specs
//! 3. Runs the batch sequentially with fail-fast semantics
//! 4. Collects live output and the aggregate outcome per goal
//!
//! Goals themselves also run sequentially: a failing goal stops the run
//! and later goals are never attempted.

use sdm_config::goal::SdmGoal;
use sdm_config::goal_command::{SdmCommandDefaults, SdmGoalCommand};
use sdm_io::batch::{BatchOptions, run_batch};
use sdm_io::command::{CommandOptions, CommandSpec};
use sdm_io::executor::ProcessExecutor;
use sdm_io::sink::OutputSink;
use tracing::{error, info};

use crate::machine::Machine;
use crate::prelude::*;
use crate::run_output::GoalRunOutput;

/// Sink that collects live output chunks into a goal's log entry.
struct LogSink<'a> {
    chunks: &'a mut Vec<String>,
}

impl OutputSink for LogSink<'_> {
    fn write(&mut self, chunk: &str) {
        self.chunks.push(chunk.to_string());
    }
}

fn to_options(defaults: &SdmCommandDefaults) -> CommandOptions {
    CommandOptions {
        working_dir: defaults.working_dir.clone(),
        env: defaults.env.clone(),
    }
}

fn to_spec(command: &SdmGoalCommand) -> CommandSpec {
    CommandSpec::new(command.program.clone(), command.args.clone()).with_options(CommandOptions {
        working_dir: command.working_dir.clone(),
        env: command.env.clone(),
    })
}

/// Run one goal's command batch and record its logs and outcome.
///
/// Returns `Ok(())` when every command of the goal succeeded, or
/// [`Error::GoalFailed`] carrying the failing exit code.
pub async fn run_goal(
    machine: &Machine,
    goal: &SdmGoal,
    output: &mut GoalRunOutput<'_>,
) -> Result<()> {
    let defaults = goal.defaults.merged_over(&machine.config.global.defaults);
    let options = BatchOptions {
        defaults: to_options(&defaults),
        ..BatchOptions::default()
    };
    let specs: Vec<CommandSpec> = goal.commands.iter().map(to_spec).collect();

    let outcome = {
        let chunks = output.logs.entry(goal.id).or_default();
        let mut sink = LogSink { chunks };
        run_batch(&specs, &options, &ProcessExecutor, &mut sink).await
    };

    let exit_code = outcome.exit_code;
    let succeeded = outcome.success();
    output.outcomes.insert(goal.id, outcome);

    if !succeeded {
        error!("Goal {} failed with exit code {exit_code}", goal.name);
        return Err(Error::GoalFailed {
            name: goal.name.clone(),
            code: exit_code,
        });
    }
    info!("Goal {} completed", goal.name);
    Ok(())
}

/// Run every goal in declaration order, stopping at the first failure.
pub async fn run_all(machine: &Machine, output: &mut GoalRunOutput<'_>) -> Result<()> {
    let goal_count = machine.config.goals.len();
    for (goal_idx, goal) in machine.config.goals.iter().enumerate() {
        info!("Goal {}/{}: {}", goal_idx + 1, goal_count, goal.name);
        run_goal(machine, goal, output).await?;
    }
    Ok(())
}
