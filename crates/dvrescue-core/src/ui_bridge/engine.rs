use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use serde_json::Value;
use url::Url;

use crate::event::{LoopHandle, Signal};
use crate::registry::{
    CapabilityId, CapabilityRegistry, CreationContext, Import, ModuleVersion, RegistryError,
};
use crate::ui_bridge::description::{ObjectDecl, ResourceBundle, UiDescription};
use crate::ui_bridge::error::UiBridgeError;
use crate::ui_bridge::object::{ObjectRef, PropertyObject, UiObject};

/// Module of the types every engine provides on its own
pub const BUILTIN_MODULE: &str = "Controls";

/// Top-level window type of the builtin module
pub const WINDOW_TYPE: &str = "ApplicationWindow";

/// Emitted once per `load` with the root object, or `None` if it failed.
#[derive(Debug, Clone)]
pub struct ObjectCreated {
    pub object: Option<ObjectRef>,
    pub url: Url,
}

/// A constructed object and its constructed children.
#[derive(Debug, Clone)]
pub struct ObjectTree {
    pub id: Option<String>,
    pub object: ObjectRef,
    pub children: Vec<ObjectTree>,
}

impl ObjectTree {
    /// Depth-first search for the object declared with `id`.
    pub fn find(&self, id: &str) -> Option<&ObjectTree> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Number of objects in this tree, root included.
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(ObjectTree::len).sum::<usize>()
    }
}

/// Weak reference to a [`UiEngine`], handed to collaborators that need it.
#[derive(Clone, Default)]
pub struct EngineHandle(Weak<UiEngine>);

impl EngineHandle {
    pub fn upgrade(&self) -> Option<Arc<UiEngine>> {
        self.0.upgrade()
    }
}

impl fmt::Debug for EngineHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EngineHandle")
            .field(&(self.0.strong_count() > 0))
            .finish()
    }
}

/// Builds object trees from UI descriptions against a frozen capability registry.
///
/// Loading is asynchronous: [`UiEngine::load`] posts the work to the main loop
/// and reports the outcome through [`UiEngine::object_created`].
/// Singletons are constructed on first reference and shared for the engine's
/// lifetime.
pub struct UiEngine {
    registry: CapabilityRegistry,
    resources: ResourceBundle,
    loop_handle: LoopHandle,
    self_ref: Weak<UiEngine>,
    style: Mutex<Option<String>>,
    singletons: Mutex<HashMap<CapabilityId, ObjectRef>>,
    roots: Mutex<Vec<(Url, ObjectTree)>>,
    object_created: Signal<ObjectCreated>,
}

impl UiEngine {
    /// Takes ownership of `registry`; nothing can be registered afterwards.
    pub fn new(
        mut registry: CapabilityRegistry,
        resources: ResourceBundle,
        loop_handle: LoopHandle,
    ) -> Result<Arc<Self>, UiBridgeError> {
        register_builtins(&mut registry)?;
        log::debug!(
            "UI engine created with {} capabilities in modules {:?}",
            registry.len(),
            registry.modules()
        );
        Ok(Arc::new_cyclic(|self_ref| Self {
            registry,
            resources,
            loop_handle,
            self_ref: self_ref.clone(),
            style: Mutex::new(None),
            singletons: Mutex::new(HashMap::new()),
            roots: Mutex::new(Vec::new()),
            object_created: Signal::new("object_created"),
        }))
    }

    pub fn handle(&self) -> EngineHandle {
        EngineHandle(self.self_ref.clone())
    }

    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    pub fn loop_handle(&self) -> &LoopHandle {
        &self.loop_handle
    }

    /// Selects the visual style applied to windows created afterwards.
    pub fn set_style(&self, style: &str) {
        log::debug!("UI style set to {}", style);
        *lock(&self.style) = Some(style.to_string());
    }

    pub fn style(&self) -> Option<String> {
        lock(&self.style).clone()
    }

    /// Notified with the root object (or `None`) of every load.
    pub fn object_created(&self) -> &Signal<ObjectCreated> {
        &self.object_created
    }

    /// Schedules loading of `url` on the main loop and returns immediately.
    pub fn load(&self, url: Url) {
        log::info!("Loading UI description {}", url);
        let engine = self.handle();
        let posted = self.loop_handle.post_labeled("ui_load", move || {
            if let Some(engine) = engine.upgrade() {
                engine.complete_load(url);
            }
        });
        if let Err(e) = posted {
            log::error!("Cannot schedule UI load: {}", e);
        }
    }

    /// Loads `url` right away on the calling thread, emitting `object_created`.
    pub fn load_now(&self, url: Url) -> Result<ObjectRef, UiBridgeError> {
        let result = self.build(&url);
        match &result {
            Ok(tree) => {
                let root = tree.object.clone();
                lock(&self.roots).push((url.clone(), tree.clone()));
                self.object_created.emit(ObjectCreated {
                    object: Some(root),
                    url,
                });
            }
            Err(e) => {
                log::warn!("{}: {}", url, e);
                self.object_created.emit(ObjectCreated { object: None, url });
            }
        }
        result.map(|tree| tree.object)
    }

    fn complete_load(&self, url: Url) {
        // Failures are reported through object_created.
        let _ = self.load_now(url);
    }

    /// Root objects of every successful load, in load order.
    pub fn root_objects(&self) -> Vec<ObjectRef> {
        lock(&self.roots)
            .iter()
            .map(|(_, tree)| tree.object.clone())
            .collect()
    }

    /// Finds an object by its declared id across all loaded trees.
    pub fn find_object(&self, id: &str) -> Option<ObjectRef> {
        lock(&self.roots)
            .iter()
            .find_map(|(_, tree)| tree.find(id).map(|t| t.object.clone()))
    }

    /// Resolves the singleton `name` under `imports`, constructing it on first use.
    pub fn singleton(&self, imports: &[Import], name: &str) -> Result<ObjectRef, UiBridgeError> {
        let capability = self.registry.resolve(imports, name)?;
        if !capability.is_singleton() {
            return Err(RegistryError::NotASingleton {
                name: name.to_string(),
            }
            .into());
        }

        // The lock is held across construction so a factory runs at most once.
        // Factories must not request singletons themselves.
        let mut singletons = lock(&self.singletons);
        if let Some(existing) = singletons.get(capability.id()) {
            return Ok(existing.clone());
        }
        log::debug!("Constructing singleton {}", capability.id());
        let instance = self.construct(capability.id(), |ctx| capability.construct(ctx))?;
        singletons.insert(capability.id().clone(), instance.clone());
        Ok(instance)
    }

    /// Number of singletons constructed so far.
    pub fn singleton_count(&self) -> usize {
        lock(&self.singletons).len()
    }

    fn build(&self, url: &Url) -> Result<ObjectTree, UiBridgeError> {
        let text = self.resources.read(url)?;
        let description = UiDescription::parse(&text, url)?;
        description.check_ids()?;

        let mut imports = description.imports()?;
        for import in &imports {
            self.registry.validate_import(import)?;
        }
        // The builtin module is always visible, after explicit imports.
        imports.push(Import::new(BUILTIN_MODULE, ModuleVersion::new(1, 0)));

        self.instantiate(&imports, &description.root)
    }

    fn instantiate(&self, imports: &[Import], decl: &ObjectDecl) -> Result<ObjectTree, UiBridgeError> {
        let capability = self.registry.resolve(imports, &decl.type_name)?;
        if capability.is_singleton() {
            return Err(RegistryError::NotCreatable {
                name: decl.type_name.clone(),
            }
            .into());
        }

        for name in &decl.singletons {
            self.singleton(imports, name)?;
        }

        let object = self.construct(capability.id(), |ctx| capability.construct(ctx))?;
        if capability.id().name == WINDOW_TYPE {
            if let Some(style) = self.style() {
                object.set_property("style", Value::String(style))?;
            }
        }
        for (name, value) in &decl.properties {
            object.set_property(name, value.clone())?;
        }

        let children = decl
            .children
            .iter()
            .map(|child| self.instantiate(imports, child))
            .collect::<Result<Vec<_>, _>>()?;

        object.component_complete();
        Ok(ObjectTree {
            id: decl.id.clone(),
            object,
            children,
        })
    }

    fn construct<F>(&self, id: &CapabilityId, factory: F) -> Result<ObjectRef, UiBridgeError>
    where
        F: FnOnce(&CreationContext<'_>) -> crate::kernel::Result<ObjectRef>,
    {
        let engine = self.handle();
        let context = CreationContext {
            id,
            engine: &engine,
            loop_handle: &self.loop_handle,
        };
        factory(&context).map_err(|e| UiBridgeError::ObjectCreationFailed {
            type_name: id.name.clone(),
            message: e.to_string(),
        })
    }
}

impl fmt::Debug for UiEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiEngine")
            .field("capabilities", &self.registry.len())
            .field("resources", &self.resources.len())
            .field("style", &self.style())
            .field("singletons", &self.singleton_count())
            .finish_non_exhaustive()
    }
}

fn register_builtins(registry: &mut CapabilityRegistry) -> Result<(), RegistryError> {
    registry.register_type(BUILTIN_MODULE, 1, 0, WINDOW_TYPE, |_ctx| {
        let window = PropertyObject::new(WINDOW_TYPE);
        window.set_property("visible", Value::Bool(true))?;
        Ok(Arc::new(window) as ObjectRef)
    })?;
    registry.register_declared(BUILTIN_MODULE, 1, 0, "Item")
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
