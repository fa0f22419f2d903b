/// CLI error types
use cadence_core::CadenceError;
use cadence_playback::PlaybackError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown command: {0} (type `help`)")]
    UnknownCommand(String),

    #[error("Bad argument: {0}")]
    BadArgument(String),

    #[error(transparent)]
    Core(#[from] CadenceError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}
