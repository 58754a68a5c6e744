use std::any::Any;
use std::path::{Path, PathBuf};

use dvrescue_core::ui_bridge::UiObject;
use url::Url;

/// Path helpers for the UI.
#[derive(Debug, Default)]
pub struct FileUtils;

impl FileUtils {
    pub fn exists(&self, path: &str) -> bool {
        Path::new(path).exists()
    }

    pub fn file_name(&self, path: &str) -> Option<String> {
        Path::new(path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
    }

    pub fn directory(&self, path: &str) -> Option<String> {
        Path::new(path)
            .parent()
            .map(|dir| dir.to_string_lossy().into_owned())
    }

    /// Local path of a `file:` URL; `None` for any other scheme.
    pub fn to_local_file(&self, url: &Url) -> Option<PathBuf> {
        if url.scheme() != "file" {
            return None;
        }
        url.to_file_path().ok()
    }

    pub fn from_local_file(&self, path: &Path) -> Option<Url> {
        Url::from_file_path(path).ok()
    }
}

impl UiObject for FileUtils {
    fn type_name(&self) -> &str {
        "FileUtils"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
