use std::any::Any;
use std::fmt;
use std::sync::{MutexGuard, PoisonError};

use dvrescue_core::storage::{SettingsStore, SharedSettings};
use dvrescue_core::ui_bridge::{UiBridgeError, UiObject};
use serde_json::Value;

/// Exposes the settings store to the UI; every property is a settings key.
pub struct SettingsUtils {
    settings: SharedSettings,
}

impl SettingsUtils {
    pub fn new(settings: SharedSettings) -> Self {
        Self { settings }
    }

    pub fn keys(&self) -> Vec<String> {
        self.store().all_keys()
    }

    pub fn value(&self, key: &str) -> Option<Value> {
        self.store().raw_value(key).cloned()
    }

    pub fn set_value(&self, key: &str, value: Value) -> dvrescue_core::kernel::Result<()> {
        let mut store = self.store();
        store.set_value(key, value)?;
        store.sync()
    }

    fn store(&self) -> MutexGuard<'_, SettingsStore> {
        self.settings.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for SettingsUtils {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsUtils")
            .field("keys", &self.keys().len())
            .finish()
    }
}

impl UiObject for SettingsUtils {
    fn type_name(&self) -> &str {
        "SettingsUtils"
    }

    fn property(&self, name: &str) -> Option<Value> {
        self.value(name)
    }

    fn set_property(&self, name: &str, value: Value) -> Result<(), UiBridgeError> {
        self.set_value(name, value)
            .map_err(|e| UiBridgeError::InvalidPropertyValue {
                type_name: self.type_name().to_string(),
                property: name.to_string(),
                reason: e.to_string(),
            })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
