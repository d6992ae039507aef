#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] sdm_config::error::Error),

    #[error("goal `{name}` failed with exit code {code}")]
    GoalFailed { name: String, code: i32 },

    #[error("no goal named `{0}` in the configuration")]
    UnknownGoal(String),
}
