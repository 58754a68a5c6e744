use thiserror::Error;

/// Errors of the logging facility
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("A global subscriber is already installed: {0}")]
    AlreadyInstalled(String),

    #[error("Invalid log filter '{directives}': {message}")]
    InvalidFilter { directives: String, message: String },

    #[error("Log state lock poisoned")]
    Poisoned,
}
