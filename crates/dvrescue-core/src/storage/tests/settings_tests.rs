use std::fs;

use serde_json::json;
use tempfile::tempdir;

use crate::kernel::error::{Error, Result};
use crate::storage::error::StorageSystemError;
use crate::storage::settings::{SettingsFormat, SettingsIdentity, SettingsStore};

#[test]
fn test_reversed_domain() {
    assert_eq!(SettingsIdentity::dvrescue().reversed_domain(), "com.dvrescue");
    let identity = SettingsIdentity::new("org", "tools.example.org", "app");
    assert_eq!(identity.reversed_domain(), "org.example.tools");
}

#[test]
fn test_missing_file_opens_empty() -> Result<()> {
    let dir = tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("dvrescue/dvrescue.json");

    let store = SettingsStore::open(SettingsIdentity::dvrescue(), &path)?;
    assert!(store.is_empty());
    assert!(!store.is_dirty());
    assert_eq!(store.path(), path);
    drop(store);

    // Nothing to write, nothing created
    assert!(!path.exists());
    Ok(())
}

#[test]
fn test_values_persist_across_reopen() -> Result<()> {
    let dir = tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("dvrescue/dvrescue.json");

    {
        let mut store = SettingsStore::open(SettingsIdentity::dvrescue(), &path)?;
        store.set_value("theme", "dark")?;
        store.set_value("recent", vec!["a.dv", "b.dv"])?;
        store.sync()?;
        assert!(!store.is_dirty());
    }

    let store = SettingsStore::open(SettingsIdentity::dvrescue(), &path)?;
    assert_eq!(store.all_keys(), vec!["recent".to_string(), "theme".to_string()]);
    assert_eq!(store.value::<String>("theme").as_deref(), Some("dark"));
    assert_eq!(store.raw_value("recent"), Some(&json!(["a.dv", "b.dv"])));
    assert_eq!(store.value::<u32>("theme"), None);
    assert_eq!(store.value_or("width", 800u32), 800);
    Ok(())
}

#[test]
fn test_drop_syncs_dirty_store() -> Result<()> {
    let dir = tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("s.json");

    {
        let mut store = SettingsStore::open(SettingsIdentity::dvrescue(), &path)?;
        store.set_value("k", 1)?;
    }

    let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written, json!({ "k": 1 }));
    Ok(())
}

#[test]
fn test_clear_removes_every_key() -> Result<()> {
    let dir = tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("s.json");
    fs::write(&path, r#"{ "theme": "dark", "width": 1024, "nested": { "a": 1 } }"#).unwrap();

    let mut store = SettingsStore::open(SettingsIdentity::dvrescue(), &path)?;
    assert_eq!(store.len(), 3);
    assert_eq!(store.clear(), 3);
    assert!(store.is_empty());
    store.sync()?;
    drop(store);

    let store = SettingsStore::open(SettingsIdentity::dvrescue(), &path)?;
    assert!(store.all_keys().is_empty());
    Ok(())
}

#[test]
fn test_clear_on_empty_store_is_noop() -> Result<()> {
    let dir = tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("s.json");

    let mut store = SettingsStore::open(SettingsIdentity::dvrescue(), &path)?;
    assert_eq!(store.clear(), 0);
    assert!(!store.is_dirty());
    Ok(())
}

#[test]
fn test_remove_reports_previous_value() -> Result<()> {
    let dir = tempdir().expect("Failed to create temp directory");
    let mut store = SettingsStore::open(SettingsIdentity::dvrescue(), &dir.path().join("s.json"))?;

    store.set_value("k", true)?;
    assert!(store.contains("k"));
    assert_eq!(store.remove("k"), Some(json!(true)));
    assert_eq!(store.remove("k"), None);
    Ok(())
}

#[test]
fn test_undecodable_file_opens_empty_and_is_kept() -> Result<()> {
    let dir = tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("s.json");
    fs::write(&path, "theme=dark\n").unwrap();

    let store = SettingsStore::open(SettingsIdentity::dvrescue(), &path)?;
    assert!(store.is_empty());
    assert!(store.is_unreadable());
    assert!(!store.is_dirty());
    drop(store);

    assert_eq!(fs::read_to_string(&path).unwrap(), "theme=dark\n");
    Ok(())
}

#[test]
fn test_clear_replaces_undecodable_file() -> Result<()> {
    let dir = tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("s.json");
    fs::write(&path, "{ not json").unwrap();

    let mut store = SettingsStore::open(SettingsIdentity::dvrescue(), &path)?;
    assert_eq!(store.clear(), 0);
    assert!(store.is_dirty());
    store.sync()?;
    assert!(!store.is_unreadable());

    let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written, json!({}));
    Ok(())
}

#[test]
fn test_unknown_extension_is_rejected() {
    let dir = tempdir().expect("Failed to create temp directory");
    let result = SettingsStore::open(SettingsIdentity::dvrescue(), &dir.path().join("s.ini"));
    assert!(matches!(
        result,
        Err(Error::StorageSystem(StorageSystemError::UnsupportedFormat(_)))
    ));
}

#[cfg(feature = "toml-config")]
#[test]
fn test_toml_store() -> Result<()> {
    let dir = tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("s.toml");
    assert_eq!(SettingsFormat::from_path(&path), Some(SettingsFormat::Toml));

    {
        let mut store = SettingsStore::open(SettingsIdentity::dvrescue(), &path)?;
        store.set_value("theme", "dark")?;
    }
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("theme = \"dark\""), "got: {}", content);
    Ok(())
}

#[cfg(feature = "yaml-config")]
#[test]
fn test_yaml_store_round_trip() -> Result<()> {
    let dir = tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("s.yml");
    assert_eq!(SettingsFormat::from_path(&path), Some(SettingsFormat::Yaml));

    {
        let mut store = SettingsStore::open(SettingsIdentity::dvrescue(), &path)?;
        store.set_value("width", 640)?;
    }
    let store = SettingsStore::open(SettingsIdentity::dvrescue(), &path)?;
    assert_eq!(store.value::<i64>("width"), Some(640));
    Ok(())
}
