use thiserror::Error;

/// Errors that end the CLI with a non-zero exit code.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Settings(#[from] tvcat_lib::SettingsError),

    #[error("{0}")]
    Run(#[from] tvcat_lib::RunError),

    /// Effective settings could not be serialized for display
    #[error("Config error: {0}")]
    Config(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
