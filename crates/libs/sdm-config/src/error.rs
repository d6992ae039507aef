//! Configuration error types.

/// Configuration errors.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    #[error(transparent)]
    IO(#[from] std::io::Error),

    /// TOML deserialization failed.
    #[error(transparent)]
    Deserialization(#[from] toml::de::Error),

    /// TOML serialization failed.
    #[error(transparent)]
    Serialization(#[from] toml::ser::Error),

    /// A command entry sets both or neither of `line` and `program`.
    #[error("goal `{goal}` command {index}: exactly one of `line` or `program` must be set")]
    InvalidCommand { goal: String, index: usize },

    /// A command entry combines `args` with the `line` form.
    #[error("goal `{goal}` command {index}: `args` cannot be combined with `line`")]
    ArgsWithLine { goal: String, index: usize },
}
