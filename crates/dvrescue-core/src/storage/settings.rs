use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::kernel::constants::{APPLICATION_NAME, ORGANIZATION_DOMAIN, ORGANIZATION_NAME};
use crate::kernel::error::Result;
use crate::storage::error::StorageSystemError;
use crate::storage::local::LocalStorageProvider;
use crate::storage::provider::StorageProvider;

/// Namespace of a settings store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsIdentity {
    pub organization: String,
    pub domain: String,
    pub application: String,
}

impl SettingsIdentity {
    pub fn new(
        organization: impl Into<String>,
        domain: impl Into<String>,
        application: impl Into<String>,
    ) -> Self {
        Self {
            organization: organization.into(),
            domain: domain.into(),
            application: application.into(),
        }
    }

    /// `("dvrescue", "dvrescue.com", "dvrescue")`
    pub fn dvrescue() -> Self {
        Self::new(ORGANIZATION_NAME, ORGANIZATION_DOMAIN, APPLICATION_NAME)
    }

    /// `dvrescue.com` becomes `com.dvrescue`.
    pub fn reversed_domain(&self) -> String {
        self.domain.rsplit('.').collect::<Vec<_>>().join(".")
    }
}

impl fmt::Display for SettingsIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({})", self.organization, self.application, self.domain)
    }
}

/// Encoding of a settings file, picked from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsFormat {
    Json,
    /// `.yaml` or `.yml`
    #[cfg(feature = "yaml-config")]
    Yaml,
    #[cfg(feature = "toml-config")]
    Toml,
}

impl SettingsFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            SettingsFormat::Json => "json",
            #[cfg(feature = "yaml-config")]
            SettingsFormat::Yaml => "yaml",
            #[cfg(feature = "toml-config")]
            SettingsFormat::Toml => "toml",
        }
    }

    /// `None` for extensions without an enabled encoder.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(SettingsFormat::Json),
                #[cfg(feature = "yaml-config")]
                "yaml" | "yml" => Some(SettingsFormat::Yaml),
                #[cfg(feature = "toml-config")]
                "toml" => Some(SettingsFormat::Toml),
                _ => None,
            })
    }

    fn serialize(&self, values: &BTreeMap<String, Value>) -> std::result::Result<String, StorageSystemError> {
        let boxed = |e: Box<dyn std::error::Error + Send + Sync>| StorageSystemError::SerializationError {
            format: self.extension().to_string(),
            source: e,
        };
        match self {
            SettingsFormat::Json => serde_json::to_string_pretty(values).map_err(|e| boxed(e.into())),
            #[cfg(feature = "yaml-config")]
            SettingsFormat::Yaml => serde_yaml::to_string(values).map_err(|e| boxed(e.into())),
            #[cfg(feature = "toml-config")]
            SettingsFormat::Toml => toml::to_string_pretty(values).map_err(|e| boxed(e.into())),
        }
    }

    fn deserialize(
        &self,
        data: &str,
        path: &Path,
    ) -> std::result::Result<BTreeMap<String, Value>, StorageSystemError> {
        if data.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        let boxed = |e: Box<dyn std::error::Error + Send + Sync>| StorageSystemError::DeserializationError {
            format: self.extension().to_string(),
            path: path.to_path_buf(),
            source: e,
        };
        match self {
            SettingsFormat::Json => serde_json::from_str(data).map_err(|e| boxed(e.into())),
            #[cfg(feature = "yaml-config")]
            SettingsFormat::Yaml => serde_yaml::from_str(data).map_err(|e| boxed(e.into())),
            #[cfg(feature = "toml-config")]
            SettingsFormat::Toml => toml::from_str(data).map_err(|e| boxed(e.into())),
        }
    }
}

/// Persistent key/value settings of one application identity.
///
/// Changes stay in memory until [`SettingsStore::sync`]; a dirty store is
/// also synced when dropped. A backing file that cannot be decoded opens as
/// an empty store and is left on disk until the store is next written.
pub struct SettingsStore {
    identity: SettingsIdentity,
    provider: LocalStorageProvider,
    file_name: PathBuf,
    format: SettingsFormat,
    values: BTreeMap<String, Value>,
    dirty: bool,
    unreadable: bool,
}

/// Settings store shared between the bootstrap and UI singletons
pub type SharedSettings = Arc<Mutex<SettingsStore>>;

impl SettingsStore {
    /// Opens the store backed by `path`, loading it if the file exists.
    pub fn open(identity: SettingsIdentity, path: &Path) -> Result<Self> {
        let format = SettingsFormat::from_path(path)
            .ok_or_else(|| StorageSystemError::UnsupportedFormat(path.to_path_buf()))?;
        let (dir, file_name) = match (path.parent(), path.file_name()) {
            (Some(dir), Some(name)) => (dir.to_path_buf(), PathBuf::from(name)),
            _ => return Err(StorageSystemError::UnsupportedFormat(path.to_path_buf()).into()),
        };
        let provider = LocalStorageProvider::new(dir);

        let mut unreadable = false;
        let values = if provider.is_file(&file_name) {
            let content = provider.read_to_string(&file_name)?;
            match format.deserialize(&content, path) {
                Ok(values) => values,
                Err(e) => {
                    log::warn!("Ignoring unreadable settings: {}", e);
                    unreadable = true;
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };
        log::debug!(
            "Opened settings {} at {} with {} keys",
            identity,
            path.display(),
            values.len()
        );

        Ok(Self {
            identity,
            provider,
            file_name,
            format,
            values,
            dirty: false,
            unreadable,
        })
    }

    pub fn identity(&self) -> &SettingsIdentity {
        &self.identity
    }

    /// Location of the backing file.
    pub fn path(&self) -> PathBuf {
        self.provider.resolve(&self.file_name)
    }

    pub fn format(&self) -> SettingsFormat {
        self.format
    }

    /// Every key, sorted.
    pub fn all_keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Raw stored value.
    pub fn raw_value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Stored value converted to `T`; `None` if absent or of another shape.
    pub fn value<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.values
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// Stored value, or `default` if absent or of another shape.
    pub fn value_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.value(key).unwrap_or(default)
    }

    pub fn set_value<T: Serialize>(&mut self, key: &str, value: T) -> Result<()> {
        let json_value = serde_json::to_value(value).map_err(|e| StorageSystemError::SerializationError {
            format: "json".to_string(),
            source: Box::new(e),
        })?;
        self.values.insert(key.to_string(), json_value);
        self.dirty = true;
        Ok(())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let removed = self.values.remove(key);
        if removed.is_some() {
            self.dirty = true;
        }
        removed
    }

    /// Removes every key and returns how many there were.
    ///
    /// An undecodable backing file counts as content: the next sync replaces
    /// it with an empty store.
    pub fn clear(&mut self) -> usize {
        let keys = self.all_keys();
        for key in &keys {
            self.remove(key);
        }
        if self.unreadable {
            self.dirty = true;
        }
        keys.len()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether there are changes not yet written.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Whether the backing file could not be decoded and was not rewritten since.
    pub fn is_unreadable(&self) -> bool {
        self.unreadable
    }

    /// Writes pending changes to disk.
    pub fn sync(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        let content = self.format.serialize(&self.values)?;
        self.provider.write_string(&self.file_name, &content)?;
        self.dirty = false;
        self.unreadable = false;
        log::trace!("Synced {} settings to {}", self.values.len(), self.path().display());
        Ok(())
    }

    /// Wraps the store for sharing with UI singletons.
    pub fn into_shared(self) -> SharedSettings {
        Arc::new(Mutex::new(self))
    }
}

impl Drop for SettingsStore {
    fn drop(&mut self) {
        if let Err(e) = self.sync() {
            log::error!("Failed to write settings {}: {}", self.path().display(), e);
        }
    }
}

impl fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsStore")
            .field("identity", &self.identity)
            .field("path", &self.path())
            .field("keys", &self.values.len())
            .field("dirty", &self.dirty)
            .field("unreadable", &self.unreadable)
            .finish()
    }
}
