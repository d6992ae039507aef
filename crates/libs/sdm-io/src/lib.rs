//! Process execution and batch command running for the SDM delivery tools.
//!
//! Provides utilities for spawning external commands, streaming their output
//! to pluggable sinks, and running ordered command batches with fail-fast
//! semantics and a size-capped aggregate report.
//!
//! # Usage
//!
//! ```rust
//! use sdm_io::batch::{BatchOptions, run_batch};
//! use sdm_io::command::CommandSpec;
//! use sdm_io::executor::ProcessExecutor;
//! use sdm_io::sink::CapturingSink;
//!
//! #[tokio::main]
//! async fn main() {
//!     let specs = vec![
//!         CommandSpec::from_line("echo hello"),
//!         CommandSpec::from_line("echo world"),
//!     ];
//!     let mut sink = CapturingSink::default();
//!
//!     let outcome = run_batch(&specs, &BatchOptions::default(), &ProcessExecutor, &mut sink).await;
//!
//!     assert_eq!(outcome.exit_code, 0);
//!     assert_eq!(outcome.attempted_lines.len(), 2);
//!     assert!(outcome.aggregate_message.contains("hello"));
//! }
//! ```

pub mod batch;
pub mod command;
pub mod executor;
pub mod process;
pub mod runner;
pub mod sink;

pub use batch::{BatchOptions, BatchOutcome, ExecutionOutcome, run_batch};
pub use command::{CommandOptions, CommandSpec};
pub use executor::{CommandExecutor, ProcessExecutor};
pub use sink::OutputSink;
