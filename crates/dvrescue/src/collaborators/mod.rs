//! Native objects the main UI instantiates by name.
//!
//! Only the behaviour the startup path relies on is implemented here; the
//! rest of each type's surface is carried as plain properties.
pub mod clipboard;
pub mod data_model;
pub mod file_utils;
pub mod file_writer;
pub mod launcher;
pub mod settings_utils;
pub mod thread;

pub use clipboard::Clipboard;
pub use data_model::{DataModel, DataModelContext};
pub use file_utils::FileUtils;
pub use file_writer::FileWriter;
pub use launcher::Launcher;
pub use settings_utils::SettingsUtils;
pub use thread::Thread;

#[cfg(test)]
mod tests;
