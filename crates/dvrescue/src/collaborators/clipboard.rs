use std::any::Any;
use std::sync::{Mutex, PoisonError};

use dvrescue_core::event::Signal;
use dvrescue_core::ui_bridge::{UiBridgeError, UiObject};
use serde_json::Value;

/// Application-wide text clipboard.
#[derive(Debug)]
pub struct Clipboard {
    text: Mutex<String>,
    text_changed: Signal<String>,
}

impl Default for Clipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard {
    pub fn new() -> Self {
        Self {
            text: Mutex::new(String::new()),
            text_changed: Signal::new("text_changed"),
        }
    }

    pub fn text(&self) -> String {
        self.text.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn set_text(&self, text: &str) {
        {
            let mut current = self.text.lock().unwrap_or_else(PoisonError::into_inner);
            if *current == text {
                return;
            }
            *current = text.to_string();
        }
        self.text_changed.emit(text.to_string());
    }

    pub fn text_changed(&self) -> &Signal<String> {
        &self.text_changed
    }
}

impl UiObject for Clipboard {
    fn type_name(&self) -> &str {
        "Clipboard"
    }

    fn property(&self, name: &str) -> Option<Value> {
        match name {
            "text" => Some(Value::String(self.text())),
            _ => None,
        }
    }

    fn set_property(&self, name: &str, value: Value) -> Result<(), UiBridgeError> {
        match (name, value) {
            ("text", Value::String(text)) => {
                self.set_text(&text);
                Ok(())
            }
            ("text", _) => Err(UiBridgeError::InvalidPropertyValue {
                type_name: self.type_name().to_string(),
                property: name.to_string(),
                reason: "expected a string".to_string(),
            }),
            _ => Err(UiBridgeError::UnknownProperty {
                type_name: self.type_name().to_string(),
                property: name.to_string(),
            }),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
