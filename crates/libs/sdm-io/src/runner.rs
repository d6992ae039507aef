//! Single-command runner with event-driven output handling.

use std::process::ExitStatus;

use tokio::io::AsyncReadExt;
use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;

use crate::command::CommandSpec;
use crate::process::spawn_process;

/// Events emitted during process execution.
#[derive(Debug, PartialEq)]
pub enum RunEvent {
    /// Process creation failed with error message.
    ProcessCreationFailed(String),
    /// Process was successfully created.
    ProcessCreated,
    /// Process ended (true = success, false = failure).
    ProcessEnd(bool),
    /// New chunk of combined stdout/stderr output from the process.
    ProcessOutputChunk(String),
}

/// Runs one command and streams its output as events.
pub struct Runner {
    spec: CommandSpec,
}

impl Runner {
    /// Create a new runner for a command spec.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sdm_io::command::CommandSpec;
    /// use sdm_io::runner::Runner;
    ///
    /// let runner = Runner::new(CommandSpec::new("ls", vec!["-la", "/tmp"]));
    /// ```
    pub fn new(spec: CommandSpec) -> Self {
        Self { spec }
    }

    /// Get the full command line with arguments.
    pub fn rendered_line(&self) -> String {
        self.spec.rendered()
    }

    async fn read_stream<T>(tx: Sender<RunEvent>, mut stream: T)
    where
        T: AsyncReadExt + Unpin,
    {
        let mut buffer = [0; 1024];
        loop {
            match stream.read(&mut buffer).await {
                Ok(0) => break, // EOF
                Ok(n) => {
                    let data = String::from_utf8_lossy(&buffer[..n]);
                    if tx
                        .send(RunEvent::ProcessOutputChunk(data.to_string()))
                        .await
                        .is_err()
                    {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    }

    fn launch_stream_reader<T>(tx: Sender<RunEvent>, stream: T) -> JoinHandle<()>
    where
        T: AsyncReadExt + Unpin + Send + 'static,
    {
        tokio::spawn(Runner::read_stream(tx, stream))
    }

    /// Run the process with event monitoring.
    ///
    /// Spawns the process and streams its output until it finishes, sending
    /// events via the provided channel. Stdout and stderr are read
    /// concurrently and delivered as a single event stream.
    ///
    /// Returns the exit status, or `None` if the process could not be
    /// spawned or waited on; the failure detail is delivered as a
    /// [`RunEvent::ProcessCreationFailed`] event.
    pub async fn run(&self, tx: Sender<RunEvent>) -> Option<ExitStatus> {
        let mut process = match spawn_process(&self.spec) {
            Ok(process) => process,
            Err(err) => {
                let _ = tx
                    .send(RunEvent::ProcessCreationFailed(err.to_string()))
                    .await;
                return None;
            }
        };

        let _ = tx.send(RunEvent::ProcessCreated).await;

        // Take stdout and stderr and launch a stream reader for each
        let stdout_task = process
            .stdout
            .take()
            .map(|stdout| Runner::launch_stream_reader(tx.clone(), stdout));
        let stderr_task = process
            .stderr
            .take()
            .map(|stderr| Runner::launch_stream_reader(tx.clone(), stderr));

        let exit_status = process.wait().await.ok();

        // Join the stream readers so every chunk is delivered before ProcessEnd
        if let Some(task) = stdout_task {
            let _ = task.await;
        }
        if let Some(task) = stderr_task {
            let _ = task.await;
        }

        let success = exit_status.map(|status| status.success()).unwrap_or(false);
        let _ = tx.send(RunEvent::ProcessEnd(success)).await;

        exit_status
    }
}
