//! What the main UI description can instantiate, by module and version.
use std::sync::Arc;

use dvrescue_core::registry::{CapabilityRegistry, RegistryError};
use dvrescue_core::storage::SharedSettings;
use dvrescue_core::ui_bridge::{ObjectRef, PropertyObject};

use crate::collaborators::{
    Clipboard, DataModel, DataModelContext, FileUtils, FileWriter, Launcher, SettingsUtils, Thread,
};

/// Types registered as plain property objects: `(module, major, minor, name)`.
const DECLARED_TYPES: &[(&str, u32, u32, &str)] = &[
    ("MediaInfo", 1, 0, "MediaInfo"),
    ("MediaPlayer", 1, 0, "MediaPlayer"),
    ("MediaPlayerBuffer", 1, 0, "MediaPlayerBuffer"),
    ("QwtQuick2", 1, 0, "QwtQuick2Plot"),
    ("QwtQuick2", 1, 0, "QwtQuick2PlotCurve"),
    ("QwtQuick2", 1, 0, "QwtQuick2PlotGrid"),
    ("QwtQuick2", 1, 0, "QwtQuick2PlotPicker"),
    ("QwtQuick2", 1, 0, "QwtQuick2PlotLegend"),
    ("SortFilterTableModel", 1, 0, "SortFilterTableModel"),
    ("TableModel", 1, 0, "TableModel"),
    ("TableModelColumn", 1, 0, "TableModelColumn"),
];

/// Registers the creatable native types.
pub fn register_types(
    registry: &mut CapabilityRegistry,
    data_model: &Arc<DataModelContext>,
) -> Result<(), RegistryError> {
    registry.register_type("Launcher", 0, 1, "Launcher", |ctx| {
        Ok(Arc::new(Launcher::new(ctx.loop_handle.clone())) as ObjectRef)
    })?;
    registry.register_type("Thread", 0, 1, "Thread", |ctx| {
        Ok(Arc::new(Thread::new(ctx.loop_handle.clone())) as ObjectRef)
    })?;
    registry.register_type("FileWriter", 0, 1, "FileWriter", |_ctx| {
        Ok(Arc::new(FileWriter::new()) as ObjectRef)
    })?;

    let context = data_model.clone();
    registry.register_type("DataModel", 1, 0, "DataModel", move |ctx| {
        Ok(Arc::new(DataModel::new(context.clone(), ctx.loop_handle.clone())) as ObjectRef)
    })?;

    for (module, major, minor, name) in DECLARED_TYPES {
        registry.register_declared(module, *major, *minor, name)?;
    }
    Ok(())
}

/// Registers the lazily constructed utility singletons.
pub fn register_singletons(
    registry: &mut CapabilityRegistry,
    settings: SharedSettings,
) -> Result<(), RegistryError> {
    registry.register_singleton("Clipboard", 1, 0, "Clipboard", |_ctx| {
        Ok(Arc::new(Clipboard::new()) as ObjectRef)
    })?;
    registry.register_singleton("ConnectionUtils", 1, 0, "ConnectionUtils", |_ctx| {
        Ok(Arc::new(PropertyObject::new("ConnectionUtils")) as ObjectRef)
    })?;
    registry.register_singleton("FileUtils", 1, 0, "FileUtils", |_ctx| {
        Ok(Arc::new(FileUtils) as ObjectRef)
    })?;
    registry.register_singleton("SettingsUtils", 1, 0, "SettingsUtils", move |_ctx| {
        Ok(Arc::new(SettingsUtils::new(settings.clone())) as ObjectRef)
    })?;
    registry.register_singleton("QtAVPlayerUtils", 1, 0, "QtAVPlayerUtils", |_ctx| {
        Ok(Arc::new(PropertyObject::new("QtAVPlayerUtils")) as ObjectRef)
    })?;
    Ok(())
}
