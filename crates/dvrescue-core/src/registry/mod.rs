//! # dvrescue Core Capability Registry
//!
//! Maps `(module, version, name)` identities to factories. UI descriptions
//! import modules and refer to capabilities by name; the UI engine resolves
//! those names here when it builds objects.
pub mod capability;
pub mod error;
pub mod registry;

pub use capability::{
    Capability, CapabilityId, CapabilityKind, CreationContext, Factory, Import, ModuleVersion,
};
pub use error::RegistryError;
pub use registry::CapabilityRegistry;

#[cfg(test)]
mod tests;
