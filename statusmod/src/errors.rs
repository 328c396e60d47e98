use statusmod_engine::CommandError;
use thiserror::Error;

/// Errors emitted while reading and running console commands.
#[derive(Debug, Error)]
pub(crate) enum HostError {
    #[error("Invalid command line: {0}")]
    InvalidCommandLine(#[from] shell_words::ParseError),
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("Missing {0}.")]
    MissingArgument(&'static str),
    #[error("Expected on or off, got {0:?}.")]
    InvalidToggle(String),
    #[error("Expected before or after, got {0:?}.")]
    InvalidPosition(String),
    #[error("Expected a whole number, got {0:?}.")]
    InvalidNumber(String),
    #[error("{0}")]
    Command(#[from] CommandError),
}
