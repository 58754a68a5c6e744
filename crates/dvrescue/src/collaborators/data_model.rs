use std::any::Any;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use dvrescue_core::event::{LoopHandle, Signal};
use dvrescue_core::kernel::Result;
use dvrescue_core::ui_bridge::{EngineHandle, PropertyObject, UiBridgeError, UiEngine, UiObject};
use serde_json::Value;

use crate::payloads::{MarkerInfo, TableModelRef};

/// Engine reference shared by every data model instance.
///
/// Set once the UI engine exists; models created before that see no engine.
#[derive(Debug, Default)]
pub struct DataModelContext {
    engine: OnceLock<EngineHandle>,
}

impl DataModelContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if an engine was already injected.
    pub fn set_engine(&self, engine: EngineHandle) -> bool {
        let injected = self.engine.set(engine).is_ok();
        if !injected {
            log::warn!("Data model engine is already set");
        }
        injected
    }

    pub fn engine(&self) -> Option<Arc<UiEngine>> {
        self.engine.get().and_then(EngineHandle::upgrade)
    }
}

#[derive(Debug)]
struct ModelState {
    markers: Mutex<Vec<MarkerInfo>>,
    table_model: Mutex<Option<TableModelRef>>,
    markers_changed: Signal<Vec<MarkerInfo>>,
    table_model_changed: Signal<TableModelRef>,
}

/// Analysis results of the selected capture, as shown by the UI.
///
/// Results are produced on worker threads and applied on the main loop.
#[derive(Debug)]
pub struct DataModel {
    context: Arc<DataModelContext>,
    loop_handle: LoopHandle,
    properties: PropertyObject,
    state: Arc<ModelState>,
}

impl DataModel {
    pub fn new(context: Arc<DataModelContext>, loop_handle: LoopHandle) -> Self {
        Self {
            context,
            loop_handle,
            properties: PropertyObject::new("DataModel"),
            state: Arc::new(ModelState {
                markers: Mutex::new(Vec::new()),
                table_model: Mutex::new(None),
                markers_changed: Signal::new("markers_changed"),
                table_model_changed: Signal::new("table_model_changed"),
            }),
        }
    }

    pub fn engine(&self) -> Option<Arc<UiEngine>> {
        self.context.engine()
    }

    pub fn markers(&self) -> Vec<MarkerInfo> {
        self.state.markers.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn table_model(&self) -> Option<TableModelRef> {
        self.state
            .table_model
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn markers_changed(&self) -> &Signal<Vec<MarkerInfo>> {
        &self.state.markers_changed
    }

    pub fn table_model_changed(&self) -> &Signal<TableModelRef> {
        &self.state.table_model_changed
    }

    /// Replaces the markers; safe to call from any thread.
    pub fn update_markers(&self, markers: Vec<MarkerInfo>) -> Result<()> {
        let state = self.state.clone();
        self.loop_handle.post_payload(markers, move |markers: Vec<MarkerInfo>| {
            *state.markers.lock().unwrap_or_else(PoisonError::into_inner) = markers.clone();
            state.markers_changed.emit(markers);
        })?;
        Ok(())
    }

    /// Publishes the table model backing the frame list; safe to call from any thread.
    pub fn attach_table_model(&self, model: TableModelRef) -> Result<()> {
        let state = self.state.clone();
        self.loop_handle.post_payload(model, move |model: TableModelRef| {
            *state.table_model.lock().unwrap_or_else(PoisonError::into_inner) = Some(model.clone());
            state.table_model_changed.emit(model);
        })?;
        Ok(())
    }
}

impl UiObject for DataModel {
    fn type_name(&self) -> &str {
        "DataModel"
    }

    fn property(&self, name: &str) -> Option<Value> {
        match name {
            "markers" => serde_json::to_value(self.markers()).ok(),
            "hasEngine" => Some(Value::Bool(self.engine().is_some())),
            _ => self.properties.property(name),
        }
    }

    fn set_property(&self, name: &str, value: Value) -> std::result::Result<(), UiBridgeError> {
        match name {
            "markers" | "hasEngine" => Err(UiBridgeError::InvalidPropertyValue {
                type_name: self.type_name().to_string(),
                property: name.to_string(),
                reason: "read-only".to_string(),
            }),
            _ => self.properties.set_property(name, value),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
