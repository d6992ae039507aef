//! Machine core for the SDM Runner.
//!
//! Holds the loaded goal configuration for the duration of a run.

use std::path::PathBuf;

use sdm_config::{SdmConfig, SdmUserConfig};

use crate::prelude::*;

/// Loaded delivery-goal configuration plus its on-disk origin.
pub struct Machine {
    /// The loaded goal configuration.
    pub config: SdmConfig,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Machine {
    /// Create a new machine instance from a configuration file.
    pub fn create(config_path: PathBuf) -> Result<Self> {
        let config = SdmUserConfig::from_file(&config_path)?;
        let config = SdmConfig::from_user_config(config)?;
        Ok(Self {
            config,
            config_path,
        })
    }
}
