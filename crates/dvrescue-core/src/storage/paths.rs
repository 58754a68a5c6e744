use std::env;
use std::path::{Path, PathBuf};

use crate::environment::Platform;
use crate::kernel::constants::LOG_FILE_NAME;
use crate::storage::error::StorageSystemError;
use crate::storage::settings::SettingsIdentity;

/// Per-user base directories for configuration and application data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardPaths {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl StandardPaths {
    pub fn new(config_dir: PathBuf, data_dir: PathBuf) -> Self {
        Self {
            config_dir,
            data_dir,
        }
    }

    /// Resolves the directories of the current user.
    ///
    /// For the host platform this asks `dirs`; a foreign `platform` is
    /// resolved from the environment with [`StandardPaths::resolve`].
    pub fn from_env(platform: Platform) -> Result<Self, StorageSystemError> {
        if platform != Platform::current() {
            return Self::resolve(platform, |name| env::var(name).ok(), dirs::home_dir());
        }

        let (config_dir, data_dir) = match platform {
            Platform::Windows => (dirs::config_dir(), dirs::data_local_dir()),
            Platform::MacOs => (dirs::preference_dir(), dirs::data_dir()),
            Platform::Other => (dirs::config_dir(), dirs::data_dir()),
        };
        let unresolved = |name: &str| StorageSystemError::PathResolutionFailed {
            name: name.to_string(),
            reason: format!("no {} directory for the current user", name),
        };
        Ok(Self::new(
            config_dir.ok_or_else(|| unresolved("config"))?,
            data_dir.ok_or_else(|| unresolved("data"))?,
        ))
    }

    /// Resolves the directories from `lookup` (environment) and `home`,
    /// following the same rules `dirs` applies on each platform.
    ///
    /// Linux and other Unix follow the XDG base directory rules: a variable
    /// is only honoured if it holds an absolute path.
    pub fn resolve<F>(platform: Platform, lookup: F, home: Option<PathBuf>) -> Result<Self, StorageSystemError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let absolute = |name: &str| {
            lookup(name)
                .map(PathBuf::from)
                .filter(|p| p.is_absolute())
        };
        let from_home = |name: &str, relative: &[&str]| {
            home.as_ref()
                .map(|h| relative.iter().fold(h.clone(), |acc, part| acc.join(part)))
                .ok_or_else(|| StorageSystemError::PathResolutionFailed {
                    name: name.to_string(),
                    reason: "home directory is unknown".to_string(),
                })
        };

        let env_or_home = |name: &str, relative: &[&str]| match absolute(name) {
            Some(path) => Ok(path),
            None => from_home(name, relative),
        };

        let (config_dir, data_dir) = match platform {
            Platform::Windows => (
                env_or_home("APPDATA", &["AppData", "Roaming"])?,
                env_or_home("LOCALAPPDATA", &["AppData", "Local"])?,
            ),
            Platform::MacOs => (
                from_home("config", &["Library", "Preferences"])?,
                from_home("data", &["Library", "Application Support"])?,
            ),
            Platform::Other => (
                env_or_home("XDG_CONFIG_HOME", &[".config"])?,
                env_or_home("XDG_DATA_HOME", &[".local", "share"])?,
            ),
        };
        Ok(Self::new(config_dir, data_dir))
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Settings file of `identity`.
    ///
    /// macOS names it after the reversed organization domain
    /// (`com.dvrescue.dvrescue.json`); elsewhere it lives in a directory named
    /// after the organization (`dvrescue/dvrescue.json`).
    pub fn settings_file(&self, identity: &SettingsIdentity, platform: Platform) -> PathBuf {
        match platform {
            Platform::MacOs => self
                .config_dir
                .join(format!("{}.{}.json", identity.reversed_domain(), identity.application)),
            Platform::Windows | Platform::Other => self
                .config_dir
                .join(&identity.organization)
                .join(format!("{}.json", identity.application)),
        }
    }

    /// Data directory of `identity`: `<data>/<organization>/<application>`.
    pub fn app_data_dir(&self, identity: &SettingsIdentity) -> PathBuf {
        self.data_dir
            .join(&identity.organization)
            .join(&identity.application)
    }

    /// Log file written when file logging is enabled.
    pub fn log_file(&self, identity: &SettingsIdentity) -> PathBuf {
        self.app_data_dir(identity).join(LOG_FILE_NAME)
    }
}
