//! Command executor capability.

use async_trait::async_trait;
use tokio::sync::mpsc::channel;
use tracing::{error, info};

use crate::batch::NOT_RUN_EXIT_CODE;
use crate::command::CommandSpec;
use crate::runner::{RunEvent, Runner};
use crate::sink::OutputSink;

/// Spawn one command, stream its combined output to a sink, and return the
/// exit code.
///
/// Implementations must not distinguish "command ran and failed" from
/// "command could not be started" in the return value: both are non-zero
/// exit codes, with any spawn diagnostic written to the sink.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(&self, spec: &CommandSpec, sink: &mut (dyn OutputSink + '_)) -> i32;
}

/// Executor backed by real OS processes.
///
/// Runs the command through [`Runner`] and forwards its output chunks to
/// the sink as they arrive. A process terminated by a signal, or one that
/// never started, reports the [`NOT_RUN_EXIT_CODE`] sentinel.
pub struct ProcessExecutor;

#[async_trait]
impl CommandExecutor for ProcessExecutor {
    async fn execute(&self, spec: &CommandSpec, sink: &mut (dyn OutputSink + '_)) -> i32 {
        let line = spec.rendered();
        let (tx, mut rx) = channel(16);
        let runner = Runner::new(spec.clone());
        let handle = tokio::spawn(async move { runner.run(tx).await });

        while let Some(event) = rx.recv().await {
            match event {
                RunEvent::ProcessCreationFailed(err) => {
                    error!("Failed to create process for `{line}` - {err}");
                    sink.write(&format!("failed to start `{line}`: {err}\n"));
                }
                RunEvent::ProcessCreated => info!("`{line}` started"),
                RunEvent::ProcessEnd(success) => {
                    if success {
                        info!("`{line}` ended successfully");
                    } else {
                        error!("`{line}` failed");
                    }
                }
                RunEvent::ProcessOutputChunk(chunk) => sink.write(&chunk),
            }
        }

        let exit_status = match handle.await {
            Ok(status) => status,
            Err(err) => {
                error!("Failed to join runner task for `{line}` - {err}");
                None
            }
        };

        exit_status
            .and_then(|status| status.code())
            .unwrap_or(NOT_RUN_EXIT_CODE)
    }
}
