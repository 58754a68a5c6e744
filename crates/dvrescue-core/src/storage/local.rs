use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::kernel::error::{Error, Result};
use crate::storage::error::StorageSystemError;
use crate::storage::provider::StorageProvider;

/// [`StorageProvider`] over a directory of the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalStorageProvider {
    root: PathBuf,
}

impl LocalStorageProvider {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_dir(dir: &Path) -> Result<()> {
        if dir.as_os_str().is_empty() || dir.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(dir).map_err(|e| Error::io(e, "create_dir_all", dir.to_path_buf()))
    }
}

impl StorageProvider for LocalStorageProvider {
    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        self.resolve(path).is_file()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let target = self.resolve(path);
        fs::read_to_string(&target).map_err(|e| Error::io(e, "read_to_string", target))
    }

    fn write_string(&self, path: &Path, contents: &str) -> Result<()> {
        let target = self.resolve(path);
        let Some(dir) = target.parent().map(Path::to_path_buf) else {
            return Err(StorageSystemError::OperationFailed {
                operation: "write_string".to_string(),
                path: target,
                message: "no parent directory".to_string(),
            }
            .into());
        };
        Self::ensure_dir(&dir)?;

        // Staged in the same directory so the rename cannot cross filesystems.
        let mut staged = NamedTempFile::new_in(&dir).map_err(|e| Error::io(e, "stage", dir.clone()))?;
        staged
            .write_all(contents.as_bytes())
            .map_err(|e| Error::io(e, "write_staged", staged.path().to_path_buf()))?;
        staged
            .persist(&target)
            .map_err(|e| Error::io(e.error, "persist", target.clone()))?;
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        let target = self.resolve(path);
        fs::remove_file(&target).map_err(|e| Error::io(e, "remove_file", target))
    }

    fn open_append(&self, path: &Path) -> Result<Box<dyn Write + Send>> {
        let target = self.resolve(path);
        if let Some(dir) = target.parent() {
            Self::ensure_dir(dir)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&target)
            .map_err(|e| Error::io(e, "open_append", target))?;
        Ok(Box::new(file))
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}
