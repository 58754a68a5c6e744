use std::sync::Arc;

use dvrescue_core::event::EventSystemError;
use dvrescue_core::kernel::Error;
use dvrescue_core::ui_bridge::{EngineHandle, PropertyObject, UiObject};
use dvrescue_core::{Application, ApplicationBuilder};
use serde_json::json;

use crate::collaborators::{DataModel, DataModelContext};
use crate::payloads::{self, MarkerInfo, TableModelRef};

fn app() -> Application {
    payloads::register(ApplicationBuilder::new().without_subscriber()).build()
}

fn marker(frame_number: u64) -> MarkerInfo {
    MarkerInfo {
        frame_number,
        time: frame_number as f64 / 29.97,
        kind: "rec_start".to_string(),
    }
}

#[test]
fn test_engine_can_be_injected_once() {
    let context = DataModelContext::new();
    assert!(context.engine().is_none());
    assert!(context.set_engine(EngineHandle::default()));
    assert!(!context.set_engine(EngineHandle::default()));
}

#[tokio::test]
async fn test_markers_from_worker_thread_apply_on_loop() {
    let app = app();
    let handle = app.loop_handle();
    let model = Arc::new(DataModel::new(Arc::new(DataModelContext::new()), handle.clone()));

    let loop_thread = std::thread::current().id();
    let quit = handle.clone();
    model.markers_changed().connect_direct(move |markers| {
        assert_eq!(std::thread::current().id(), loop_thread);
        assert_eq!(markers.len(), 2);
        quit.quit();
    });

    let worker_model = model.clone();
    std::thread::spawn(move || worker_model.update_markers(vec![marker(1), marker(30)]).unwrap())
        .join()
        .unwrap();
    assert!(model.markers().is_empty(), "applied only once the loop runs");

    assert_eq!(app.exec().await, 0);
    assert_eq!(model.markers(), vec![marker(1), marker(30)]);
    assert_eq!(
        model.property("markers").unwrap()[1]["frame_number"],
        json!(30)
    );
}

#[tokio::test]
async fn test_table_model_is_published() {
    let app = app();
    let handle = app.loop_handle();
    let model = DataModel::new(Arc::new(DataModelContext::new()), handle.clone());
    let table = TableModelRef(Arc::new(PropertyObject::new("TableModel")));

    model.attach_table_model(table).unwrap();
    handle.quit();
    assert_eq!(app.exec().await, 0);

    let attached = model.table_model().expect("table model attached");
    assert_eq!(attached.0.type_name(), "TableModel");
}

#[test]
fn test_unregistered_payloads_are_refused() {
    let app = ApplicationBuilder::new().without_subscriber().build();
    let model = DataModel::new(Arc::new(DataModelContext::new()), app.loop_handle());

    let err = model.update_markers(vec![marker(1)]).unwrap_err();
    assert!(matches!(
        err,
        Error::EventSystem(EventSystemError::UnregisteredPayload { .. })
    ));
}

#[test]
fn test_other_properties_are_stored() {
    let app = app();
    let model = DataModel::new(Arc::new(DataModelContext::new()), app.loop_handle());

    model.set_property("total", json!(120)).unwrap();
    assert_eq!(model.property("total"), Some(json!(120)));
    assert_eq!(model.property("hasEngine"), Some(json!(false)));
    assert!(model.set_property("markers", json!([])).is_err());
}
