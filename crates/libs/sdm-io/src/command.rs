//! Command specification and per-command option types.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Per-command execution context.
///
/// Unset fields inherit the batch-wide defaults through [`merged_over`].
/// The environment is an overlay on top of the parent process environment;
/// it is applied to the child process only, never to the calling process.
///
/// [`merged_over`]: CommandOptions::merged_over
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOptions {
    /// Working directory for the command.
    pub working_dir: Option<PathBuf>,
    /// Environment variables added to the child process environment.
    pub env: BTreeMap<String, String>,
}

impl CommandOptions {
    /// Merge these options over `defaults`, field by field.
    ///
    /// `working_dir` falls back to the default only when unset. The
    /// environment is shallow-merged key by key, with entries from `self`
    /// winning over same-named defaults.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sdm_io::command::CommandOptions;
    ///
    /// let mut defaults = CommandOptions::default();
    /// defaults.env.insert("A".into(), "1".into());
    /// defaults.env.insert("B".into(), "2".into());
    ///
    /// let mut per_command = CommandOptions::default();
    /// per_command.env.insert("B".into(), "3".into());
    ///
    /// let merged = per_command.merged_over(&defaults);
    /// assert_eq!(merged.env.get("A").map(String::as_str), Some("1"));
    /// assert_eq!(merged.env.get("B").map(String::as_str), Some("3"));
    /// ```
    pub fn merged_over(&self, defaults: &CommandOptions) -> CommandOptions {
        let mut env = defaults.env.clone();
        env.extend(self.env.iter().map(|(k, v)| (k.clone(), v.clone())));

        CommandOptions {
            working_dir: self
                .working_dir
                .clone()
                .or_else(|| defaults.working_dir.clone()),
            env,
        }
    }
}

/// One external command to run: program, pre-split arguments, and options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program to invoke. Must not contain whitespace; arguments go in `args`.
    pub program: String,
    /// Command line arguments, passed verbatim to the process.
    pub args: Vec<String>,
    /// Execution context for this command.
    pub options: CommandOptions,
}

impl CommandSpec {
    /// Create a new command spec with default options.
    pub fn new(program: impl Into<String>, args: Vec<impl Into<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(|a| a.into()).collect(),
            options: CommandOptions::default(),
        }
    }

    /// Build a command spec from a sentence such as `"npm run build"`.
    ///
    /// Splits on whitespace: the first token is the program, the rest are
    /// arguments. Does not respect quoting; use [`CommandSpec::new`] with a
    /// pre-split argument list when arguments contain spaces.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sdm_io::command::CommandSpec;
    ///
    /// let spec = CommandSpec::from_line("npm run build");
    /// assert_eq!(spec.program, "npm");
    /// assert_eq!(spec.args, vec!["run", "build"]);
    /// ```
    pub fn from_line(line: &str) -> Self {
        let mut tokens = line.split_whitespace();
        let program = tokens.next().unwrap_or_default().to_string();
        let args: Vec<String> = tokens.map(str::to_string).collect();
        Self {
            program,
            args,
            options: CommandOptions::default(),
        }
    }

    /// Wrap a shell snippet as `bash -c <script>`.
    pub fn bash(script: impl Into<String>) -> Self {
        Self {
            program: String::from("bash"),
            args: vec![String::from("-c"), script.into()],
            options: CommandOptions::default(),
        }
    }

    /// Replace the options of this spec.
    pub fn with_options(mut self, options: CommandOptions) -> Self {
        self.options = options;
        self
    }

    /// Get the full command line with arguments, for display and logging.
    pub fn rendered(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}
