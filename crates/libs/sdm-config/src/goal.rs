//! Goal definition types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::goal_command::{SdmCommandDefaults, SdmGoalCommand, SdmUserGoalCommand};
use crate::prelude::*;

/// User-defined delivery goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdmUserGoal {
    /// Goal name. Used to select the goal on the command line.
    pub name: String,
    /// Goal description.
    #[serde(default)]
    pub description: String,
    /// Defaults applied to every command of this goal.
    #[serde(default)]
    pub defaults: SdmCommandDefaults,
    /// Ordered commands the goal runs.
    pub commands: Vec<SdmUserGoalCommand>,
}

/// Internal goal definition with UUID and resolved commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdmGoal {
    /// Unique goal identifier assigned by the system.
    pub id: Uuid,
    /// Goal name from user input.
    pub name: String,
    /// Goal description from user input.
    pub description: String,
    /// Goal-level command defaults from user input.
    pub defaults: SdmCommandDefaults,
    /// Ordered commands, resolved to argv form.
    pub commands: Vec<SdmGoalCommand>,
}

impl SdmGoal {
    /// Convert a user goal to an internal goal with UUID.
    pub fn from_user_goal(goal: SdmUserGoal) -> Result<Self> {
        let commands = goal
            .commands
            .into_iter()
            .enumerate()
            .map(|(index, command)| SdmGoalCommand::from_user_command(&goal.name, index, command))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            id: Uuid::new_v4(),
            name: goal.name,
            description: goal.description,
            defaults: goal.defaults,
            commands,
        })
    }
}
