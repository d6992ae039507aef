//! Sequential batch command runner.
//!
//! Executes an ordered list of commands one at a time, short-circuiting on
//! the first failure, and produces a single presentation-ready report that
//! aggregates every attempted command's output. The aggregate is truncated
//! tail-first when it would exceed the payload limit of the status surfaces
//! it is forwarded to, since build errors surface at the end of a log.

use tracing::{error, info, warn};

use crate::command::{CommandOptions, CommandSpec};
use crate::executor::CommandExecutor;
use crate::sink::OutputSink;

/// Exit code reported when a command never ran or its status is unavailable.
pub const NOT_RUN_EXIT_CODE: i32 = -1;

/// Payload limit of the external status surface the aggregate is sized for.
pub const MAX_REPORT_CHARS: usize = 65_535;

/// Default truncation threshold: 90% of the payload limit.
pub const TRUNCATE_THRESHOLD: usize = MAX_REPORT_CHARS / 10 * 9;

/// Length of the message tail preserved by truncation.
pub const TRUNCATE_TAIL_CHARS: usize = 2048;

const TRUNCATION_BANNER: &str = "TRUNCATED - see external logs for full detail";

/// Batch-wide execution and reporting options.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Defaults merged under each command's own options.
    pub defaults: CommandOptions,
    /// Truncate the aggregate message unconditionally.
    pub truncate_output: bool,
    /// Wrap the aggregate message in a Markdown code fence.
    pub wrap_in_fence: bool,
    /// Aggregate length above which truncation triggers on its own.
    pub truncate_threshold: usize,
    /// How much of the message tail truncation preserves.
    pub tail_chars: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            defaults: CommandOptions::default(),
            truncate_output: false,
            wrap_in_fence: false,
            truncate_threshold: TRUNCATE_THRESHOLD,
            tail_chars: TRUNCATE_TAIL_CHARS,
        }
    }
}

/// Result of running one command of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    /// Exit code; 0 means success, [`NOT_RUN_EXIT_CODE`] means not run.
    pub exit_code: i32,
    /// Combined stdout/stderr text captured during the run.
    pub captured_output: String,
    /// The command plus arguments, joined for display.
    pub rendered_line: String,
}

/// Aggregate result of running a command batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Exit code of the last command attempted: the first failing command,
    /// or the last command if all succeeded.
    pub exit_code: i32,
    /// Concatenation of each attempted command's rendered line and captured
    /// output, in execution order, possibly truncated and fence-wrapped.
    pub aggregate_message: String,
    /// Rendered command lines actually attempted, in input order.
    pub attempted_lines: Vec<String>,
}

impl BatchOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Tees process output into the batch's capture buffer and the caller's sink.
struct TeeSink<'a> {
    capture: String,
    inner: &'a mut (dyn OutputSink + 'a),
}

impl OutputSink for TeeSink<'_> {
    fn write(&mut self, chunk: &str) {
        self.capture.push_str(chunk);
        self.inner.write(chunk);
    }
}

/// Run an ordered command batch, stopping at the first failure.
///
/// Commands execute strictly one at a time, in input order. Each command's
/// options are merged field-by-field over `options.defaults` before it is
/// handed to the executor, and its output is streamed to `sink` as it
/// arrives. The returned outcome carries the exit code of the last command
/// attempted and an aggregate report of every attempted command.
///
/// An empty batch is a caller configuration error, not a vacuous success:
/// it reports the [`NOT_RUN_EXIT_CODE`] sentinel and a diagnostic message
/// without spawning anything.
///
/// # Examples
///
/// ```rust
/// use sdm_io::batch::{BatchOptions, run_batch};
/// use sdm_io::command::CommandSpec;
/// use sdm_io::executor::ProcessExecutor;
/// use sdm_io::sink::NullSink;
///
/// #[tokio::main]
/// async fn main() {
///     let specs = vec![
///         CommandSpec::from_line("echo hello"),
///         CommandSpec::from_line("false"),
///         CommandSpec::from_line("echo never"),
///     ];
///     let outcome = run_batch(
///         &specs,
///         &BatchOptions::default(),
///         &ProcessExecutor,
///         &mut NullSink,
///     )
///     .await;
///
///     assert_eq!(outcome.exit_code, 1);
///     assert_eq!(outcome.attempted_lines.len(), 2);
///     assert!(!outcome.aggregate_message.contains("never"));
/// }
/// ```
pub async fn run_batch(
    specs: &[CommandSpec],
    options: &BatchOptions,
    executor: &dyn CommandExecutor,
    sink: &mut (dyn OutputSink + '_),
) -> BatchOutcome {
    if specs.is_empty() {
        warn!("Batch contains no commands");
        let message = render_message(
            String::from("batch contains no commands; nothing was run"),
            options,
        );
        return BatchOutcome {
            exit_code: NOT_RUN_EXIT_CODE,
            aggregate_message: message,
            attempted_lines: Vec::new(),
        };
    }

    let mut outcomes: Vec<ExecutionOutcome> = Vec::new();
    let mut exit_code = 0;

    for spec in specs {
        if spec.program.contains(' ') {
            warn!(
                "Program `{}` contains whitespace; did you forget to split it into arguments?",
                spec.program
            );
        }

        let merged = spec
            .clone()
            .with_options(spec.options.merged_over(&options.defaults));
        let line = merged.rendered();

        info!("Running `{line}`");
        let mut tee = TeeSink {
            capture: String::new(),
            inner: &mut *sink,
        };
        let code = executor.execute(&merged, &mut tee).await;
        if code == 0 {
            info!("`{line}` succeeded");
        } else {
            error!("`{line}` exited with {code}");
        }

        outcomes.push(ExecutionOutcome {
            exit_code: code,
            captured_output: tee.capture,
            rendered_line: line,
        });

        exit_code = code;
        if code != 0 {
            break;
        }
    }

    let aggregate_message = render_message(render_aggregate(&outcomes), options);

    BatchOutcome {
        exit_code,
        aggregate_message,
        attempted_lines: outcomes.into_iter().map(|o| o.rendered_line).collect(),
    }
}

fn render_aggregate(outcomes: &[ExecutionOutcome]) -> String {
    outcomes
        .iter()
        .map(|outcome| {
            format!(
                "running: `{}`\n\n{}",
                outcome.rendered_line, outcome.captured_output
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_message(message: String, options: &BatchOptions) -> String {
    apply_fence(apply_truncation(message, options), options)
}

fn apply_truncation(message: String, options: &BatchOptions) -> String {
    if !options.truncate_output && message.len() <= options.truncate_threshold {
        return message;
    }
    format!(
        "{TRUNCATION_BANNER}\n\n{}",
        tail_slice(&message, options.tail_chars)
    )
}

/// The final `tail_chars` bytes of `message`, shrunk to a char boundary.
fn tail_slice(message: &str, tail_chars: usize) -> &str {
    if message.len() <= tail_chars {
        return message;
    }
    let mut start = message.len() - tail_chars;
    while !message.is_char_boundary(start) {
        start += 1;
    }
    &message[start..]
}

fn apply_fence(message: String, options: &BatchOptions) -> String {
    if !options.wrap_in_fence {
        return message;
    }
    if message.contains("```") {
        warn!("Aggregate message already contains a code fence; leaving it unwrapped");
        return message;
    }
    format!("```\n{message}\n```")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use async_trait::async_trait;

    use super::*;
    use crate::executor::ProcessExecutor;
    use crate::sink::{CapturingSink, NullSink};

    /// Executor with canned outputs keyed by program name.
    struct ScriptedExecutor {
        responses: BTreeMap<String, (i32, String)>,
    }

    impl ScriptedExecutor {
        fn new(responses: &[(&str, i32, &str)]) -> Self {
            Self {
                responses: responses
                    .iter()
                    .map(|(program, code, output)| {
                        (program.to_string(), (*code, output.to_string()))
                    })
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl CommandExecutor for ScriptedExecutor {
        async fn execute(&self, spec: &CommandSpec, sink: &mut (dyn OutputSink + '_)) -> i32 {
            let (code, output) = self
                .responses
                .get(&spec.program)
                .cloned()
                .unwrap_or((0, String::new()));
            sink.write(&output);
            code
        }
    }

    #[tokio::test]
    async fn empty_batch_reports_sentinel_failure() {
        let outcome = run_batch(
            &[],
            &BatchOptions::default(),
            &ProcessExecutor,
            &mut NullSink,
        )
        .await;

        assert_eq!(outcome.exit_code, NOT_RUN_EXIT_CODE);
        assert!(outcome.attempted_lines.is_empty());
        assert!(outcome.aggregate_message.contains("no commands"));
    }

    #[tokio::test]
    async fn aggregate_contains_outputs_in_order() {
        let executor = ScriptedExecutor::new(&[("a", 0, "A"), ("b", 0, "B"), ("c", 0, "C")]);
        let specs = vec![
            CommandSpec::from_line("a"),
            CommandSpec::from_line("b"),
            CommandSpec::from_line("c"),
        ];

        let outcome = run_batch(&specs, &BatchOptions::default(), &executor, &mut NullSink).await;

        assert_eq!(outcome.exit_code, 0);
        assert_eq!(outcome.attempted_lines, vec!["a", "b", "c"]);
        let message = &outcome.aggregate_message;
        let pos_a = message.find("running: `a`").expect("missing header for a");
        let pos_b = message.find("running: `b`").expect("missing header for b");
        let pos_c = message.find("running: `c`").expect("missing header for c");
        assert!(pos_a < pos_b && pos_b < pos_c);
        assert!(message.find('A').unwrap() < pos_b);
        assert!(message.find('B').unwrap() < pos_c);
        assert!(message.contains('C'));
    }

    #[tokio::test]
    async fn fail_fast_skips_later_commands() {
        let executor =
            ScriptedExecutor::new(&[("ok", 0, "fine\n"), ("boom", 7, "broken\n"), ("later", 0, "")]);
        let specs = vec![
            CommandSpec::from_line("ok"),
            CommandSpec::from_line("boom"),
            CommandSpec::from_line("later"),
        ];

        let outcome = run_batch(&specs, &BatchOptions::default(), &executor, &mut NullSink).await;

        assert_eq!(outcome.exit_code, 7);
        assert_eq!(outcome.attempted_lines, vec!["ok", "boom"]);
        assert!(!outcome.aggregate_message.contains("later"));
    }

    #[tokio::test]
    async fn end_to_end_with_real_processes() {
        let specs = vec![
            CommandSpec::new("echo", vec!["hello"]),
            CommandSpec::new("false", Vec::<String>::new()),
            CommandSpec::new("echo", vec!["never"]),
        ];
        let mut sink = CapturingSink::default();

        let outcome = run_batch(&specs, &BatchOptions::default(), &ProcessExecutor, &mut sink).await;

        assert_eq!(outcome.exit_code, 1);
        assert_eq!(outcome.attempted_lines.len(), 2);
        assert!(outcome.aggregate_message.contains("hello"));
        assert!(!outcome.aggregate_message.contains("never"));
        // the live sink saw the same output the aggregate recorded
        assert!(sink.log().contains("hello"));
    }

    #[tokio::test]
    async fn default_env_reaches_child_and_per_command_wins() {
        let mut options = BatchOptions::default();
        options
            .defaults
            .env
            .insert(String::from("WHO"), String::from("nobody"));

        let mut spec = CommandSpec::bash("echo \"$WHO\"");
        spec.options
            .env
            .insert(String::from("WHO"), String::from("world"));

        let outcome = run_batch(
            &[spec],
            &options,
            &ProcessExecutor,
            &mut NullSink,
        )
        .await;

        assert_eq!(outcome.exit_code, 0);
        assert!(outcome.aggregate_message.contains("world"));
        assert!(!outcome.aggregate_message.contains("nobody"));
    }

    #[tokio::test]
    async fn spawn_failure_surfaces_as_sentinel_exit() {
        let specs = vec![CommandSpec::from_line("definitely-not-a-real-binary")];

        let outcome = run_batch(
            &specs,
            &BatchOptions::default(),
            &ProcessExecutor,
            &mut NullSink,
        )
        .await;

        assert_eq!(outcome.exit_code, NOT_RUN_EXIT_CODE);
        assert_eq!(outcome.attempted_lines.len(), 1);
        assert!(outcome.aggregate_message.contains("failed to start"));
    }

    #[test]
    fn truncation_leaves_short_messages_unchanged() {
        let options = BatchOptions {
            truncate_threshold: 10_000,
            ..BatchOptions::default()
        };
        let message = String::from("0123456789");
        assert_eq!(apply_truncation(message.clone(), &options), message);
    }

    #[test]
    fn truncation_preserves_exact_tail() {
        let options = BatchOptions {
            truncate_threshold: 1_000,
            ..BatchOptions::default()
        };
        let message: String = ('a'..='z').cycle().take(100_000).collect();
        let expected_tail = &message[message.len() - TRUNCATE_TAIL_CHARS..];

        let truncated = apply_truncation(message.clone(), &options);

        assert!(truncated.starts_with(TRUNCATION_BANNER));
        assert!(truncated.ends_with(expected_tail));
        assert_eq!(
            truncated.len(),
            TRUNCATION_BANNER.len() + 2 + TRUNCATE_TAIL_CHARS
        );
    }

    #[test]
    fn truncate_output_is_an_unconditional_override() {
        let options = BatchOptions {
            truncate_output: true,
            ..BatchOptions::default()
        };
        let truncated = apply_truncation(String::from("short"), &options);
        assert!(truncated.starts_with(TRUNCATION_BANNER));
        assert!(truncated.ends_with("short"));
    }

    #[test]
    fn tail_slice_respects_char_boundaries() {
        // 'é' is two bytes; a cut landing inside it moves past it
        let message = String::from("log ends with é");
        assert_eq!(tail_slice(&message, 2), "é");
        assert_eq!(tail_slice(&message, 1), "");
        assert_eq!(tail_slice(&message, 3), " é");
    }

    #[test]
    fn fence_wraps_clean_messages_only() {
        let options = BatchOptions {
            wrap_in_fence: true,
            ..BatchOptions::default()
        };

        let wrapped = apply_fence(String::from("plain output"), &options);
        assert!(wrapped.starts_with("```\n"));
        assert!(wrapped.ends_with("\n```"));

        let already_fenced = String::from("```\nnested\n```");
        assert_eq!(
            apply_fence(already_fenced.clone(), &options),
            already_fenced
        );
    }
}
