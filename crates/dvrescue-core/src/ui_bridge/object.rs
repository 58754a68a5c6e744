use std::any::Any;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;

use crate::ui_bridge::error::UiBridgeError;

/// An object the UI engine can create and bind properties on.
pub trait UiObject: Any + Send + Sync + Debug {
    /// Exposed type name, as referred to by UI descriptions
    fn type_name(&self) -> &str;

    /// Current value of a property, if the object has it.
    fn property(&self, _name: &str) -> Option<Value> {
        None
    }

    /// Assigns a property declared in a UI description.
    fn set_property(&self, name: &str, _value: Value) -> Result<(), UiBridgeError> {
        Err(UiBridgeError::UnknownProperty {
            type_name: self.type_name().to_string(),
            property: name.to_string(),
        })
    }

    /// Called once every declared property and child has been applied.
    fn component_complete(&self) {}

    /// Cast to Any for downcasting
    fn as_any(&self) -> &dyn Any;
}

/// Shared reference to a constructed object
pub type ObjectRef = Arc<dyn UiObject>;

/// Downcasts an object reference to its concrete type.
pub fn downcast_object<T: UiObject>(object: &ObjectRef) -> Option<&T> {
    object.as_any().downcast_ref::<T>()
}

/// Object that accepts any property and stores it verbatim.
///
/// Used for types whose behaviour lives outside this process's concern.
#[derive(Debug)]
pub struct PropertyObject {
    type_name: String,
    properties: Mutex<BTreeMap<String, Value>>,
}

impl PropertyObject {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            properties: Mutex::new(BTreeMap::new()),
        }
    }

    /// Property names currently set, sorted.
    pub fn property_names(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Value>> {
        self.properties
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl UiObject for PropertyObject {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn property(&self, name: &str) -> Option<Value> {
        self.lock().get(name).cloned()
    }

    fn set_property(&self, name: &str, value: Value) -> Result<(), UiBridgeError> {
        self.lock().insert(name.to_string(), value);
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
