//! # dvrescue Core Storage System Errors
//!
//! Defines [`StorageSystemError`]: filesystem failures, unresolved standard
//! directories and settings files that cannot be encoded or decoded.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageSystemError {
    #[error("{operation} {}: {source}", path.display())]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot resolve {name}: {reason}")]
    PathResolutionFailed { name: String, reason: String },

    #[error("cannot encode settings as {format}: {source}")]
    SerializationError {
        format: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("cannot decode {format} settings {}: {source}", path.display())]
    DeserializationError {
        format: String,
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("no settings format for {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("{operation} {}: {message}", path.display())]
    OperationFailed {
        operation: String,
        path: PathBuf,
        message: String,
    },
}

impl StorageSystemError {
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: PathBuf) -> Self {
        StorageSystemError::Io {
            source,
            operation: operation.into(),
            path,
        }
    }
}
