use std::collections::HashMap;
use std::path::PathBuf;

use crate::environment::Platform;
use crate::storage::error::StorageSystemError;
use crate::storage::paths::StandardPaths;
use crate::storage::settings::SettingsIdentity;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn test_xdg_variables_are_honoured() {
    let paths = StandardPaths::resolve(
        Platform::Other,
        lookup(&[("XDG_CONFIG_HOME", "/cfg"), ("XDG_DATA_HOME", "/data")]),
        Some(PathBuf::from("/home/u")),
    )
    .unwrap();

    assert_eq!(paths.config_dir(), PathBuf::from("/cfg"));
    assert_eq!(paths.data_dir(), PathBuf::from("/data"));
}

#[test]
fn test_relative_xdg_values_fall_back_to_home() {
    let paths = StandardPaths::resolve(
        Platform::Other,
        lookup(&[("XDG_CONFIG_HOME", "relative/cfg")]),
        Some(PathBuf::from("/home/u")),
    )
    .unwrap();

    assert_eq!(paths.config_dir(), PathBuf::from("/home/u/.config"));
    assert_eq!(paths.data_dir(), PathBuf::from("/home/u/.local/share"));
}

#[test]
fn test_missing_home_fails() {
    let result = StandardPaths::resolve(Platform::Other, lookup(&[]), None);
    assert!(matches!(
        result,
        Err(StorageSystemError::PathResolutionFailed { .. })
    ));
}

#[test]
fn test_settings_file_layout_per_platform() {
    let identity = SettingsIdentity::dvrescue();
    let paths = StandardPaths::new(PathBuf::from("/cfg"), PathBuf::from("/data"));

    assert_eq!(
        paths.settings_file(&identity, Platform::Other),
        PathBuf::from("/cfg/dvrescue/dvrescue.json")
    );
    assert_eq!(
        paths.settings_file(&identity, Platform::MacOs),
        PathBuf::from("/cfg/com.dvrescue.dvrescue.json")
    );
}

#[test]
fn test_macos_uses_library_folders() {
    let paths = StandardPaths::resolve(
        Platform::MacOs,
        lookup(&[("XDG_CONFIG_HOME", "/ignored")]),
        Some(PathBuf::from("/Users/u")),
    )
    .unwrap();

    assert_eq!(paths.config_dir(), PathBuf::from("/Users/u/Library/Preferences"));
    assert_eq!(
        paths.data_dir(),
        PathBuf::from("/Users/u/Library/Application Support")
    );
}

#[test]
fn test_log_file_lives_in_app_data_dir() {
    let identity = SettingsIdentity::dvrescue();
    let paths = StandardPaths::new(PathBuf::from("/cfg"), PathBuf::from("/data"));

    assert_eq!(
        paths.log_file(&identity),
        PathBuf::from("/data/dvrescue/dvrescue/dvrescue.log")
    );
}

#[cfg(all(unix, not(target_os = "macos")))]
#[test]
fn test_host_paths_match_xdg_resolution() {
    let host = StandardPaths::from_env(Platform::Other).unwrap();
    let resolved = StandardPaths::resolve(
        Platform::Other,
        |name| std::env::var(name).ok(),
        dirs::home_dir(),
    )
    .unwrap();
    assert_eq!(host, resolved);
}
