use std::collections::BTreeMap;
use std::sync::Arc;

use crate::kernel::error::Result;
use crate::registry::capability::{
    Capability, CapabilityId, CapabilityKind, CreationContext, Import, ModuleVersion,
};
use crate::registry::error::RegistryError;
use crate::ui_bridge::{ObjectRef, PropertyObject};

/// Key under which a capability is stored: module, name and major version.
/// Two registrations differing only in minor version would shadow each other.
type CapabilityKey = (String, String, u32);

/// Registry of every capability a UI description may instantiate.
///
/// Filled during bootstrap and then handed to the UI engine, which owns it
/// from that point on. Nothing can be registered once loading has started.
#[derive(Debug, Default)]
pub struct CapabilityRegistry {
    capabilities: BTreeMap<CapabilityKey, Capability>,
}

impl CapabilityRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            capabilities: BTreeMap::new(),
        }
    }

    /// Register a prepared capability.
    pub fn register(&mut self, capability: Capability) -> std::result::Result<(), RegistryError> {
        let id = capability.id();
        let key = (id.module.clone(), id.name.clone(), id.major);
        if self.capabilities.contains_key(&key) {
            return Err(RegistryError::DuplicateCapability { id: id.clone() });
        }
        log::debug!("Registered {:?} {}", capability.kind(), id);
        self.capabilities.insert(key, capability);
        Ok(())
    }

    /// Register a creatable type. Every declaration gets a new instance.
    pub fn register_type<F>(
        &mut self,
        module: &str,
        major: u32,
        minor: u32,
        name: &str,
        factory: F,
    ) -> std::result::Result<(), RegistryError>
    where
        F: Fn(&CreationContext<'_>) -> Result<ObjectRef> + Send + Sync + 'static,
    {
        self.register(Capability::new(
            CapabilityId::new(module, major, minor, name),
            CapabilityKind::Type,
            Arc::new(factory),
        ))
    }

    /// Register a singleton. The factory runs at most once per UI engine,
    /// on first reference.
    pub fn register_singleton<F>(
        &mut self,
        module: &str,
        major: u32,
        minor: u32,
        name: &str,
        factory: F,
    ) -> std::result::Result<(), RegistryError>
    where
        F: Fn(&CreationContext<'_>) -> Result<ObjectRef> + Send + Sync + 'static,
    {
        self.register(Capability::new(
            CapabilityId::new(module, major, minor, name),
            CapabilityKind::Singleton,
            Arc::new(factory),
        ))
    }

    /// Register a creatable type whose instances are plain [`PropertyObject`]s.
    pub fn register_declared(
        &mut self,
        module: &str,
        major: u32,
        minor: u32,
        name: &str,
    ) -> std::result::Result<(), RegistryError> {
        let type_name = name.to_string();
        self.register_type(module, major, minor, name, move |_ctx| {
            Ok(Arc::new(PropertyObject::new(type_name.clone())) as ObjectRef)
        })
    }

    /// Checks that an import names an installed module at a compatible version.
    pub fn validate_import(&self, import: &Import) -> std::result::Result<(), RegistryError> {
        let mut module_found = false;
        for capability in self.capabilities.values() {
            let id = capability.id();
            if id.module != import.module {
                continue;
            }
            module_found = true;
            if import.version.exposes(id.version()) {
                return Ok(());
            }
        }
        if module_found {
            Err(RegistryError::UnsupportedVersion {
                module: import.module.clone(),
                version: import.version.to_string(),
            })
        } else {
            Err(RegistryError::UnknownModule {
                module: import.module.clone(),
            })
        }
    }

    /// Finds the capability `name` refers to under `imports`.
    ///
    /// A name provided by more than one import is ambiguous.
    pub fn resolve(&self, imports: &[Import], name: &str) -> std::result::Result<&Capability, RegistryError> {
        let mut found: Vec<&Capability> = Vec::new();
        for import in imports {
            let key = (import.module.clone(), name.to_string(), import.version.major);
            if let Some(capability) = self.capabilities.get(&key) {
                if import.version.exposes(capability.id().version())
                    && !found.iter().any(|c| c.id() == capability.id())
                {
                    found.push(capability);
                }
            }
        }
        match found.len() {
            0 => Err(RegistryError::UnknownType {
                name: name.to_string(),
            }),
            1 => Ok(found[0]),
            _ => Err(RegistryError::AmbiguousType {
                name: name.to_string(),
                modules: found.iter().map(|c| c.id().module.clone()).collect(),
            }),
        }
    }

    /// Look up a capability by module, name and major version.
    pub fn get(&self, module: &str, name: &str, major: u32) -> Option<&Capability> {
        self.capabilities
            .get(&(module.to_string(), name.to_string(), major))
    }

    /// Whether `module` provides `name` at `version` or an older minor.
    pub fn contains(&self, module: &str, name: &str, version: ModuleVersion) -> bool {
        self.get(module, name, version.major)
            .is_some_and(|c| version.exposes(c.id().version()))
    }

    /// Iterate over registered capabilities, ordered by module then name.
    pub fn iter(&self) -> impl Iterator<Item = &Capability> {
        self.capabilities.values()
    }

    /// Names of all modules with at least one capability, sorted and deduplicated.
    pub fn modules(&self) -> Vec<&str> {
        let mut modules: Vec<&str> = self
            .capabilities
            .keys()
            .map(|(module, _, _)| module.as_str())
            .collect();
        modules.dedup();
        modules
    }

    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }
}
