use crate::event::{EventSystemError, PayloadRegistry};
use crate::ui_bridge::ObjectCreated;

#[derive(Debug, Clone)]
struct Marker {
    _frame: u64,
}

#[test]
fn test_builtins_are_registered() {
    let registry = PayloadRegistry::new();
    assert!(registry.is_registered::<String>());
    assert!(registry.is_registered::<i32>());
    assert!(registry.is_registered::<url::Url>());
    assert!(registry.is_registered::<ObjectCreated>());
    assert!(!registry.is_registered::<Marker>());
}

#[test]
fn test_register_is_idempotent() {
    let mut registry = PayloadRegistry::new();
    let before = registry.len();

    assert!(registry.register::<Marker>());
    assert!(!registry.register::<Marker>(), "Second registration reports no change");
    assert_eq!(registry.len(), before + 1);
}

#[test]
fn test_vec_is_distinct_from_element_type() {
    let mut registry = PayloadRegistry::new();
    registry.register::<Marker>();

    assert!(!registry.is_registered::<Vec<Marker>>());
    registry.register::<Vec<Marker>>();
    assert!(registry.is_registered::<Vec<Marker>>());
}

#[test]
fn test_ensure_registered_names_the_type() {
    let registry = PayloadRegistry::new();
    match registry.ensure_registered::<Marker>() {
        Err(EventSystemError::UnregisteredPayload { type_name }) => {
            assert!(type_name.ends_with("Marker"), "unexpected name {}", type_name)
        }
        other => panic!("Expected UnregisteredPayload, got {:?}", other),
    }
}
