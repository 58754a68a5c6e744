use crate::registry::{CapabilityKind, CapabilityRegistry, Import, ModuleVersion, RegistryError};

fn v(major: u32, minor: u32) -> ModuleVersion {
    ModuleVersion::new(major, minor)
}

fn sample_registry() -> CapabilityRegistry {
    let mut registry = CapabilityRegistry::new();
    registry.register_declared("Launcher", 0, 1, "Launcher").unwrap();
    registry.register_declared("QwtQuick2", 1, 0, "QwtQuick2Plot").unwrap();
    registry.register_declared("QwtQuick2", 1, 0, "QwtQuick2PlotCurve").unwrap();
    registry.register_declared("Newer", 1, 2, "Widget").unwrap();
    registry
}

#[test]
fn test_module_version_parse() {
    assert_eq!("1.0".parse::<ModuleVersion>().unwrap(), v(1, 0));
    assert_eq!(" 0.1 ".parse::<ModuleVersion>().unwrap(), v(0, 1));
    assert!(matches!(
        "1".parse::<ModuleVersion>(),
        Err(RegistryError::InvalidVersion { .. })
    ));
    assert!("a.b".parse::<ModuleVersion>().is_err());
}

#[test]
fn test_exposes_same_major_older_minor() {
    assert!(v(1, 2).exposes(v(1, 0)));
    assert!(v(1, 2).exposes(v(1, 2)));
    assert!(!v(1, 2).exposes(v(1, 3)));
    assert!(!v(2, 0).exposes(v(1, 0)));
}

#[test]
fn test_duplicate_registration_rejected() {
    let mut registry = sample_registry();
    let err = registry
        .register_declared("Launcher", 0, 1, "Launcher")
        .expect_err("duplicate must fail");
    assert!(matches!(err, RegistryError::DuplicateCapability { .. }));

    // Same name under another major version is a distinct capability.
    registry.register_declared("Launcher", 1, 0, "Launcher").unwrap();
    assert_eq!(registry.len(), 5);
}

#[test]
fn test_resolve_through_import() {
    let registry = sample_registry();
    let imports = vec![Import::new("QwtQuick2", v(1, 0)), Import::new("Launcher", v(0, 1))];

    let plot = registry.resolve(&imports, "QwtQuick2Plot").unwrap();
    assert_eq!(plot.id().module, "QwtQuick2");
    assert_eq!(plot.kind(), CapabilityKind::Type);

    let launcher = registry.resolve(&imports, "Launcher").unwrap();
    assert_eq!(launcher.id().version(), v(0, 1));
}

#[test]
fn test_resolve_requires_import() {
    let registry = sample_registry();
    let imports = vec![Import::new("Launcher", v(0, 1))];

    assert!(matches!(
        registry.resolve(&imports, "QwtQuick2Plot"),
        Err(RegistryError::UnknownType { .. })
    ));
}

#[test]
fn test_resolve_hides_newer_minor() {
    let registry = sample_registry();

    let old_import = vec![Import::new("Newer", v(1, 1))];
    assert!(registry.resolve(&old_import, "Widget").is_err());

    let new_import = vec![Import::new("Newer", v(1, 5))];
    assert!(registry.resolve(&new_import, "Widget").is_ok());
}

#[test]
fn test_resolve_ambiguous_name() {
    let mut registry = sample_registry();
    registry.register_declared("Other", 1, 0, "QwtQuick2Plot").unwrap();
    let imports = vec![Import::new("QwtQuick2", v(1, 0)), Import::new("Other", v(1, 0))];

    match registry.resolve(&imports, "QwtQuick2Plot") {
        Err(RegistryError::AmbiguousType { modules, .. }) => {
            assert_eq!(modules, vec!["QwtQuick2".to_string(), "Other".to_string()])
        }
        other => panic!("Expected AmbiguousType, got {:?}", other.map(|c| c.id().clone())),
    }
}

#[test]
fn test_validate_import() {
    let registry = sample_registry();

    assert!(registry.validate_import(&Import::new("QwtQuick2", v(1, 0))).is_ok());
    assert!(matches!(
        registry.validate_import(&Import::new("QwtQuick2", v(2, 0))),
        Err(RegistryError::UnsupportedVersion { .. })
    ));
    assert!(matches!(
        registry.validate_import(&Import::new("Missing", v(1, 0))),
        Err(RegistryError::UnknownModule { .. })
    ));
}

#[test]
fn test_modules_sorted_and_unique() {
    let registry = sample_registry();
    assert_eq!(registry.modules(), vec!["Launcher", "Newer", "QwtQuick2"]);
    assert!(registry.contains("QwtQuick2", "QwtQuick2PlotCurve", v(1, 0)));
    assert!(!registry.contains("QwtQuick2", "QwtQuick2PlotGrid", v(1, 0)));
}
