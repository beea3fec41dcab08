//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::application::CommandParseError;
use crate::domain::DomainError;

/// Application errors carry domain errors together with the command or script
/// line that produced them.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("rejected `{command}`: {source}")]
    Rejected {
        command: String,
        #[source]
        source: DomainError,
    },

    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: CommandParseError,
    },

    #[error("invariant broken after line {line}: {source}")]
    InvariantBroken {
        line: usize,
        #[source]
        source: DomainError,
    },

    #[error("no unused id after {attempts} attempts")]
    IdExhausted { attempts: usize },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
