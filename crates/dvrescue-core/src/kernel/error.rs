//! # dvrescue Core Kernel Errors
//!
//! Defines the aggregate [`Error`] of the bootstrap kernel.
//!
//! Every subsystem (event loop, capability registry, storage, logging, UI
//! bridge) owns a typed error enum. Each converts into [`Error`] through a
//! `#[from]` variant, so kernel code can propagate any of them with `?`.
use std::path::PathBuf;
use std::result::Result as StdResult;

use thiserror::Error as ThisError;

use crate::event::error::EventSystemError;
use crate::logging::LoggingError;
use crate::registry::error::RegistryError;
use crate::storage::error::StorageSystemError;
use crate::ui_bridge::error::UiBridgeError;

/// Error type of the dvrescue bootstrap kernel
#[derive(Debug, ThisError)]
pub enum Error {
    /// Event loop, signal or payload registration error
    #[error("event loop: {0}")]
    EventSystem(#[from] EventSystemError),

    /// Capability registration or resolution error
    #[error("capability registry: {0}")]
    Registry(#[from] RegistryError),

    /// Settings store or filesystem error
    #[error("storage: {0}")]
    StorageSystem(#[from] StorageSystemError),

    /// Logging facility error
    #[error("logging: {0}")]
    Logging(#[from] LoggingError),

    /// UI engine error
    #[error("ui engine: {0}")]
    UiBridge(#[from] UiBridgeError),

    /// A bootstrap step ran out of order or failed.
    #[error("{phase} step failed: {message}")]
    KernelLifecycleError {
        phase: KernelLifecyclePhase,
        message: String,
        #[source]
        source: Option<Box<Error>>,
    },

    #[error("{0}")]
    Other(String),
}

/// Bootstrap step an error is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum KernelLifecyclePhase {
    #[error("Settings")]
    Settings,
    #[error("UiLoad")]
    UiLoad,
}

/// Result of kernel operations.
pub type Result<T> = StdResult<T, Error>;

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}

impl Error {
    /// Wraps an I/O error with the operation and path it happened on.
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: PathBuf) -> Self {
        Error::StorageSystem(StorageSystemError::io(source, operation, path))
    }

    /// Builds a lifecycle error without an underlying cause.
    pub fn lifecycle(phase: KernelLifecyclePhase, message: impl Into<String>) -> Self {
        Error::KernelLifecycleError {
            phase,
            message: message.into(),
            source: None,
        }
    }
}
