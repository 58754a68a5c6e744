//! # dvrescue Core UI Bridge Errors
//!
//! Defines [`UiBridgeError`], covering everything that can go wrong while
//! the UI engine reads a description resource and builds its objects:
//! unknown resources, malformed descriptions, unresolvable types and
//! property assignments the target object rejects.
use std::path::PathBuf;

use thiserror::Error;

use crate::registry::RegistryError;

#[derive(Debug, Error)]
pub enum UiBridgeError {
    #[error("No resource at '{url}'")]
    ResourceNotFound { url: String },

    #[error("Unsupported resource scheme in '{url}'")]
    UnsupportedScheme { url: String },

    #[error("Failed to read UI description '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed UI description '{url}': {source}")]
    InvalidDescription {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Type resolution failed: {0}")]
    Registry(#[from] RegistryError),

    #[error("'{type_name}' has no property '{property}'")]
    UnknownProperty { type_name: String, property: String },

    #[error("Invalid value for '{type_name}.{property}': {reason}")]
    InvalidPropertyValue {
        type_name: String,
        property: String,
        reason: String,
    },

    #[error("Object id '{id}' is declared more than once")]
    DuplicateObjectId { id: String },

    #[error("Failed to construct '{type_name}': {message}")]
    ObjectCreationFailed { type_name: String, message: String },

    #[error("UI engine was dropped")]
    EngineGone,
}
