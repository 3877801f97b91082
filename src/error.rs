use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown direction '{0}'")]
pub struct ParseDirectionError(pub String);

/// Errors raised while parsing an operator console line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (type 'help' for a list)")]
    UnknownCommand(String),
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),
    #[error(transparent)]
    Direction(#[from] ParseDirectionError),
}

/// Errors surfaced by a `ControllerHandle`.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("simulation controller has shut down")]
    ControllerClosed,
}
