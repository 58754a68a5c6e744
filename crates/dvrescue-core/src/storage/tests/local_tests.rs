use std::io::Write;
use std::path::PathBuf;

use tempfile::tempdir;

use crate::kernel::error::Result;
use crate::storage::local::LocalStorageProvider;
use crate::storage::provider::StorageProvider;

fn p(s: &str) -> PathBuf {
    PathBuf::from(s)
}

#[test]
fn test_write_creates_parent_dirs_and_reads_back() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let provider = LocalStorageProvider::new(temp_dir.path().to_path_buf());

    let nested = p("a/b/settings.json");
    provider.write_string(&nested, "{}")?;

    assert!(provider.is_file(&nested));
    assert_eq!(provider.read_to_string(&nested)?, "{}");
    assert_eq!(provider.resolve(&nested), temp_dir.path().join("a/b/settings.json"));
    Ok(())
}

#[test]
fn test_write_replaces_existing_content() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let provider = LocalStorageProvider::new(temp_dir.path().to_path_buf());

    provider.write_string(&p("f.txt"), "first version, longer")?;
    provider.write_string(&p("f.txt"), "second")?;
    assert_eq!(provider.read_to_string(&p("f.txt"))?, "second");

    // No temp files left behind next to the target
    let entries = std::fs::read_dir(temp_dir.path()).unwrap().count();
    assert_eq!(entries, 1);
    Ok(())
}

#[test]
fn test_remove_file() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let provider = LocalStorageProvider::new(temp_dir.path().to_path_buf());

    provider.write_string(&p("gone.txt"), "x")?;
    assert!(provider.exists(&p("gone.txt")));
    provider.remove_file(&p("gone.txt"))?;
    assert!(!provider.exists(&p("gone.txt")));

    assert!(provider.remove_file(&p("gone.txt")).is_err());
    Ok(())
}

#[test]
fn test_open_append_appends() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let provider = LocalStorageProvider::new(temp_dir.path().to_path_buf());
    let log = p("logs/app.log");

    {
        let mut writer = provider.open_append(&log)?;
        writer.write_all(b"one\n").unwrap();
    }
    {
        let mut writer = provider.open_append(&log)?;
        writer.write_all(b"two\n").unwrap();
    }

    assert_eq!(provider.read_to_string(&log)?, "one\ntwo\n");
    Ok(())
}

#[test]
fn test_read_missing_file_is_io_error() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let provider = LocalStorageProvider::new(temp_dir.path().to_path_buf());

    let err = provider.read_to_string(&p("missing.json")).unwrap_err();
    assert!(err.to_string().contains("read_to_string"), "got: {}", err);
}
