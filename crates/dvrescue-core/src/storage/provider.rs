use std::fmt::Debug;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::kernel::error::Result;

/// File access used by the settings store and the log file.
///
/// Paths are relative to the provider's root unless absolute.
pub trait StorageProvider: Send + Sync + Debug {
    fn exists(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Replaces `path` with `contents`; readers never see a partial file.
    fn write_string(&self, path: &Path, contents: &str) -> Result<()>;

    fn remove_file(&self, path: &Path) -> Result<()>;

    /// Appending writer, created along with missing parent directories.
    fn open_append(&self, path: &Path) -> Result<Box<dyn Write + Send>>;

    /// Location `path` refers to on disk.
    fn resolve(&self, path: &Path) -> PathBuf;
}
