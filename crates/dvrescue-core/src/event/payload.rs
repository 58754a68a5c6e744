//! Registry of types allowed to cross threads through the main loop.
//!
//! Queued signal connections and [`LoopHandle::post_payload`](crate::event::LoopHandle::post_payload)
//! only accept payloads whose type was registered here before the
//! application object was built.
use std::any::{type_name, TypeId};
use std::collections::HashMap;

use url::Url;

use crate::event::error::EventSystemError;
use crate::ui_bridge::ObjectCreated;

/// Set of payload types that may be delivered across threads.
#[derive(Debug, Clone)]
pub struct PayloadRegistry {
    types: HashMap<TypeId, &'static str>,
}

impl PayloadRegistry {
    /// Creates a registry holding only the builtin payload types
    /// (`String`, `bool`, `i32`, `Url` and the UI engine's [`ObjectCreated`]).
    pub fn new() -> Self {
        let mut registry = Self {
            types: HashMap::new(),
        };
        registry.register::<String>();
        registry.register::<bool>();
        registry.register::<i32>();
        registry.register::<Url>();
        registry.register::<ObjectCreated>();
        registry
    }

    /// Registers `T` for cross-thread delivery.
    ///
    /// Returns `false` if `T` was already registered; registering twice is harmless.
    pub fn register<T: Send + 'static>(&mut self) -> bool {
        self.types.insert(TypeId::of::<T>(), type_name::<T>()).is_none()
    }

    pub fn is_registered<T: 'static>(&self) -> bool {
        self.types.contains_key(&TypeId::of::<T>())
    }

    /// Fails with [`EventSystemError::UnregisteredPayload`] unless `T` is registered.
    pub fn ensure_registered<T: 'static>(&self) -> Result<(), EventSystemError> {
        if self.is_registered::<T>() {
            Ok(())
        } else {
            Err(EventSystemError::UnregisteredPayload {
                type_name: type_name::<T>(),
            })
        }
    }

    /// Names of all registered types, sorted.
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.types.values().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for PayloadRegistry {
    fn default() -> Self {
        Self::new()
    }
}
