//! Core configuration types for the SDM delivery tools.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::goal::{SdmGoal, SdmUserGoal};
use crate::goal_command::SdmCommandDefaults;
use crate::prelude::*;

/// Global configuration settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdmGlobalConfig {
    /// Configuration version.
    pub version: String,
    /// Defaults applied to every goal's commands.
    #[serde(default)]
    pub defaults: SdmCommandDefaults,
}

/// User-provided configuration from TOML files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdmUserConfig {
    /// Global settings.
    pub global: SdmGlobalConfig,
    /// Goal definitions.
    pub goals: Vec<SdmUserGoal>,
}

/// Internal configuration with generated UUIDs and resolved commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdmConfig {
    /// Global settings.
    pub global: SdmGlobalConfig,
    /// Goal definitions with UUIDs.
    pub goals: Vec<SdmGoal>,
}

impl SdmConfig {
    /// Convert user configuration to internal configuration.
    ///
    /// Assigns UUIDs to goals and resolves every command entry to argv
    /// form, rejecting malformed entries.
    pub fn from_user_config(config: SdmUserConfig) -> Result<Self> {
        Ok(Self {
            global: config.global,
            goals: config
                .goals
                .into_iter()
                .map(SdmGoal::from_user_goal)
                .collect::<Result<Vec<_>>>()?,
        })
    }
}

impl SdmUserConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(file_path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(file_path)?;
        Ok(Self::from_toml(&contents)?)
    }
    /// Parse configuration from TOML string.
    pub fn from_toml(value: &str) -> Result<Self> {
        Ok(toml::from_str(value)?)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    pub fn deserialize() -> Result<()> {
        let content = r#"
            # Delivery Goal Configuration File
            # This file defines goals and the command batches they run

            # Global settings
            [global]
            version = "1.0.0"

            [global.defaults]
            working_dir = "."

            [global.defaults.env]
            NODE_ENV = "production"


            # Goals
            [[goals]]
            name = "site-build"
            description = "Build the website image and run the site build inside it"

            [goals.defaults.env]
            JEKYLL_ENV = "production"

            [[goals.commands]]
            line = "docker build -f ./docker/Dockerfile -t site-dev:latest ."

            [[goals.commands]]
            program = "bash"
            args = ["-c", "npm run --silent build || (npm ci && npm run build)"]

            [[goals]]
            name = "site-spellcheck"
            description = "Spellcheck the site markdown sources"

            [[goals.commands]]
            line = "mdspell -a -n --en-us --report **/*.md"
        "#;
        let user = SdmUserConfig::from_toml(content)?;
        let config = SdmConfig::from_user_config(user)?;

        assert_eq!(config.goals.len(), 2);
        assert_eq!(
            config.global.defaults.env.get("NODE_ENV").map(String::as_str),
            Some("production")
        );
        let build = &config.goals[0];
        assert_eq!(build.name, "site-build");
        assert_eq!(build.commands.len(), 2);
        assert_eq!(build.commands[0].program, "docker");
        assert_eq!(build.commands[1].program, "bash");
        Ok(())
    }

    #[test]
    pub fn malformed_command_entry_rejected() {
        let content = r#"
            [global]
            version = "1.0.0"

            [[goals]]
            name = "broken"

            [[goals.commands]]
            line = "make all"
            program = "make"
        "#;
        let user = SdmUserConfig::from_toml(content).expect("TOML itself is well-formed");
        assert!(matches!(
            SdmConfig::from_user_config(user),
            Err(Error::InvalidCommand { index: 0, .. })
        ));
    }
}
