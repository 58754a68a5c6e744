use std::any::Any;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use dvrescue_core::kernel::{Error, Result};
use dvrescue_core::storage::{LocalStorageProvider, StorageProvider};
use dvrescue_core::ui_bridge::{UiBridgeError, UiObject};
use serde_json::Value;

/// Writes text documents chosen by the UI, such as exported reports.
#[derive(Debug, Default)]
pub struct FileWriter {
    file_name: Mutex<Option<PathBuf>>,
}

impl FileWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file_name(&self) -> Option<PathBuf> {
        self.file_name.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn set_file_name(&self, path: &Path) {
        *self.file_name.lock().unwrap_or_else(PoisonError::into_inner) = Some(path.to_path_buf());
    }

    /// Replaces the content of the target file with `text`.
    pub fn write(&self, text: &str) -> Result<()> {
        let path = self
            .file_name()
            .ok_or_else(|| Error::from("FileWriter has no fileName"))?;
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let name = path.file_name().map(PathBuf::from).unwrap_or_default();
        LocalStorageProvider::new(dir).write_string(&name, text)?;
        log::debug!("Wrote {} bytes to {}", text.len(), path.display());
        Ok(())
    }
}

impl UiObject for FileWriter {
    fn type_name(&self) -> &str {
        "FileWriter"
    }

    fn property(&self, name: &str) -> Option<Value> {
        match name {
            "fileName" => self
                .file_name()
                .map(|p| Value::String(p.to_string_lossy().into_owned())),
            _ => None,
        }
    }

    fn set_property(&self, name: &str, value: Value) -> std::result::Result<(), UiBridgeError> {
        match (name, value) {
            ("fileName", Value::String(path)) => {
                self.set_file_name(Path::new(&path));
                Ok(())
            }
            ("fileName", _) => Err(UiBridgeError::InvalidPropertyValue {
                type_name: self.type_name().to_string(),
                property: name.to_string(),
                reason: "expected a path string".to_string(),
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
