//! # dvrescue Core Storage
//!
//! Per-user directories, the persistent settings store and the filesystem
//! provider both are written through.
pub mod error;
pub mod local;
pub mod paths;
pub mod provider;
pub mod settings;

pub use error::StorageSystemError;
pub use local::LocalStorageProvider;
pub use paths::StandardPaths;
pub use provider::StorageProvider;
pub use settings::{SettingsFormat, SettingsIdentity, SettingsStore, SharedSettings};

#[cfg(test)]
mod tests;
