//! Goal command entry types.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Default execution context, declared globally or per goal.
///
/// Precedence is field-level: a per-command `working_dir` or environment
/// entry wins over the goal defaults, which win over the global defaults.
/// Environments are shallow-merged key by key, never replaced wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdmCommandDefaults {
    /// Working directory commands run in unless they set their own.
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
    /// Environment variables added to every command's child environment.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

impl SdmCommandDefaults {
    /// Merge these defaults over a wider scope, field by field.
    pub fn merged_over(&self, outer: &SdmCommandDefaults) -> SdmCommandDefaults {
        let mut env = outer.env.clone();
        env.extend(self.env.iter().map(|(k, v)| (k.clone(), v.clone())));
        SdmCommandDefaults {
            working_dir: self.working_dir.clone().or_else(|| outer.working_dir.clone()),
            env,
        }
    }
}

/// User-defined command entry. Usually loaded from TOML files.
///
/// A command is declared either as a `line` sentence such as
/// `"npm run build"` (split on whitespace, no quoting) or as `program`
/// plus pre-split `args`. Setting both, or neither, is a configuration
/// error, as is combining `args` with `line`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdmUserGoalCommand {
    /// Whole command as one whitespace-split sentence.
    #[serde(default)]
    pub line: Option<String>,
    /// Program to invoke.
    #[serde(default)]
    pub program: Option<String>,
    /// Arguments for `program`.
    #[serde(default)]
    pub args: Vec<String>,
    /// Working directory override for this command.
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
    /// Environment entries for this command, merged over the defaults.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

/// Internal command entry, resolved to argv form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdmGoalCommand {
    /// Program to invoke.
    pub program: String,
    /// Arguments, passed verbatim.
    pub args: Vec<String>,
    /// Working directory override from user input.
    pub working_dir: Option<PathBuf>,
    /// Environment entries from user input.
    pub env: BTreeMap<String, String>,
}

impl SdmGoalCommand {
    /// Resolve a user command entry to argv form.
    ///
    /// `goal` and `index` identify the entry in error messages.
    pub fn from_user_command(
        goal: &str,
        index: usize,
        value: SdmUserGoalCommand,
    ) -> Result<Self> {
        let invalid = || Error::InvalidCommand {
            goal: goal.to_string(),
            index,
        };

        match (value.line, value.program) {
            (Some(_), Some(_)) | (None, None) => Err(invalid()),
            (Some(line), None) => {
                if !value.args.is_empty() {
                    return Err(Error::ArgsWithLine {
                        goal: goal.to_string(),
                        index,
                    });
                }
                let mut tokens = line.split_whitespace().map(str::to_string);
                let program = tokens.next().ok_or_else(invalid)?;
                Ok(Self {
                    program,
                    args: tokens.collect(),
                    working_dir: value.working_dir,
                    env: value.env,
                })
            }
            (None, Some(program)) => Ok(Self {
                program,
                args: value.args,
                working_dir: value.working_dir,
                env: value.env,
            }),
        }
    }
}
