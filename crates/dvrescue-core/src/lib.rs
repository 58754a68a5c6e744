//! # dvrescue-core
//!
//! Startup kernel of the dvrescue GUI: the main event loop and its signals,
//! the capability registry the UI description is resolved against, the
//! settings store, the logging facility, executable search path handling and
//! the UI engine.
pub mod environment;
pub mod event;
pub mod kernel;
pub mod logging;
pub mod registry;
pub mod storage;
pub mod ui_bridge;

pub use kernel::error::Error as KernelError;
pub use kernel::{Application, ApplicationAttribute, ApplicationBuilder, LaunchOptions};
pub use event::{EventLoop, LoopHandle, PayloadRegistry, Signal};
pub use registry::CapabilityRegistry;
pub use storage::{SettingsIdentity, SettingsStore, StandardPaths};
pub use ui_bridge::{ResourceBundle, UiEngine};
