//! Low-level async process spawning.

use std::io;
use std::process::Stdio;

use tokio::process::{Child, Command};

use crate::command::CommandSpec;

/// Spawn a new async process with piped stdout and stderr.
///
/// Launches the subprocess described by `spec` using tokio. The working
/// directory and environment overlay from the spec's options are applied to
/// the child process only; the calling process is never mutated. Both
/// stdout and stderr are piped and can be accessed via the returned Child.
///
/// # Examples
///
/// ```rust
/// use sdm_io::command::CommandSpec;
/// use sdm_io::process::spawn_process;
///
/// #[tokio::main]
/// async fn main() {
///     let spec = CommandSpec::new("echo", vec!["Hello"]);
///     let mut child = spawn_process(&spec).unwrap();
///     let output = child.stdout.take().unwrap();
/// }
/// ```
pub fn spawn_process(spec: &CommandSpec) -> Result<Child, io::Error> {
    let mut command = Command::new(&spec.program);
    command
        .args(&spec.args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    if let Some(dir) = &spec.options.working_dir {
        command.current_dir(dir);
    }
    command.envs(&spec.options.env);

    command.spawn()
}
