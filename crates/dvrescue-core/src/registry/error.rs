//! # dvrescue Core Capability Registry Errors
//!
//! Defines [`RegistryError`]: invalid registrations and failures to resolve
//! a type or module named by a UI description.
use thiserror::Error;

use crate::registry::capability::CapabilityId;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Capability '{id}' is already registered")]
    DuplicateCapability { id: CapabilityId },

    #[error("Module '{module}' is not installed")]
    UnknownModule { module: String },

    #[error("Module '{module}' version {version} is not installed")]
    UnsupportedVersion { module: String, version: String },

    #[error("Invalid module version '{version}': expected <major>.<minor>")]
    InvalidVersion { version: String },

    #[error("'{name}' is not a type")]
    UnknownType { name: String },

    #[error("'{name}' is ambiguous. Found in {modules:?}")]
    AmbiguousType { name: String, modules: Vec<String> },

    #[error("'{name}' is a singleton and cannot be created")]
    NotCreatable { name: String },

    #[error("'{name}' is not a singleton")]
    NotASingleton { name: String },
}
