//! Configuration management for the SDM delivery tools.
//!
//! Provides types and utilities for declaring delivery goals and the
//! command batches they run.
//!
//! # Usage
//!
//! ```rust
//! use sdm_config::{SdmConfig, SdmUserConfig};
//!
//! let toml = r#"
//!     [global]
//!     version = "1.0.0"
//!
//!     [[goals]]
//!     name = "site-build"
//!
//!     [[goals.commands]]
//!     line = "echo building"
//! "#;
//!
//! let user_config = SdmUserConfig::from_toml(toml).unwrap();
//! let config = SdmConfig::from_user_config(user_config).unwrap();
//! assert_eq!(config.goals[0].commands[0].program, "echo");
//! ```

pub mod error;
pub mod goal;
pub mod goal_command;
pub mod prelude;
pub mod sdm_config;

pub use sdm_config::{SdmConfig, SdmUserConfig};
