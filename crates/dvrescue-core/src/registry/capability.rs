use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::event::LoopHandle;
use crate::kernel::error::Result;
use crate::registry::error::RegistryError;
use crate::ui_bridge::{EngineHandle, ObjectRef};

/// Identity under which a capability is exposed to UI descriptions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CapabilityId {
    pub module: String,
    pub major: u32,
    pub minor: u32,
    pub name: String,
}

impl CapabilityId {
    pub fn new(module: impl Into<String>, major: u32, minor: u32, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            major,
            minor,
            name: name.into(),
        }
    }

    pub fn version(&self) -> ModuleVersion {
        ModuleVersion::new(self.major, self.minor)
    }
}

impl fmt::Display for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}.{} {}", self.module, self.major, self.minor, self.name)
    }
}

/// `<major>.<minor>` version of a module, as written in an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleVersion {
    pub major: u32,
    pub minor: u32,
}

impl ModuleVersion {
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Whether a capability registered at `provided` is visible through an
    /// import of `self`: same major, minor not newer than the import's.
    pub fn exposes(&self, provided: ModuleVersion) -> bool {
        provided.major == self.major && provided.minor <= self.minor
    }
}

impl fmt::Display for ModuleVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for ModuleVersion {
    type Err = RegistryError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || RegistryError::InvalidVersion {
            version: s.to_string(),
        };
        let (major, minor) = s.trim().split_once('.').ok_or_else(invalid)?;
        Ok(Self {
            major: major.parse().map_err(|_| invalid())?,
            minor: minor.parse().map_err(|_| invalid())?,
        })
    }
}

/// A module import as declared by a UI description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub module: String,
    pub version: ModuleVersion,
}

impl Import {
    pub fn new(module: impl Into<String>, version: ModuleVersion) -> Self {
        Self {
            module: module.into(),
            version,
        }
    }
}

/// How instances of a capability are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityKind {
    /// A fresh instance for every object declaration
    Type,
    /// One lazily built instance per UI engine, shared by all references
    Singleton,
}

/// What a factory gets to see while constructing an instance.
#[derive(Debug)]
pub struct CreationContext<'a> {
    pub id: &'a CapabilityId,
    pub engine: &'a EngineHandle,
    pub loop_handle: &'a LoopHandle,
}

/// Constructor of a capability instance
pub type Factory = Arc<dyn Fn(&CreationContext<'_>) -> Result<ObjectRef> + Send + Sync>;

/// A registered capability: identity, kind and constructor.
#[derive(Clone)]
pub struct Capability {
    id: CapabilityId,
    kind: CapabilityKind,
    factory: Factory,
}

impl Capability {
    pub fn new(id: CapabilityId, kind: CapabilityKind, factory: Factory) -> Self {
        Self { id, kind, factory }
    }

    pub fn id(&self) -> &CapabilityId {
        &self.id
    }

    pub fn kind(&self) -> CapabilityKind {
        self.kind
    }

    pub fn is_singleton(&self) -> bool {
        self.kind == CapabilityKind::Singleton
    }

    /// Runs the factory.
    pub fn construct(&self, context: &CreationContext<'_>) -> Result<ObjectRef> {
        (self.factory)(context)
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capability")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
