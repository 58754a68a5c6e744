//! Values that cross from worker threads onto the main loop.
use std::fmt;

use dvrescue_core::ui_bridge::ObjectRef;
use dvrescue_core::ApplicationBuilder;
use serde::{Deserialize, Serialize};

/// A marker found while analysing a capture: a frame with a notable event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerInfo {
    pub frame_number: u64,
    pub time: f64,
    pub kind: String,
}

/// Reference to a table model handed from a worker to the UI.
#[derive(Debug, Clone)]
pub struct TableModelRef(pub ObjectRef);

/// Lifecycle of an external process started by a launcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    NotRunning,
    Starting,
    Running,
}

/// How an external process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    NormalExit,
    CrashExit,
}

/// Why an external process could not be run to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessError {
    FailedToStart,
    Crashed,
    ReadError,
    UnknownError,
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ProcessError::FailedToStart => "process failed to start",
            ProcessError::Crashed => "process crashed",
            ProcessError::ReadError => "cannot read process output",
            ProcessError::UnknownError => "unknown process error",
        };
        f.write_str(text)
    }
}

/// Registers every payload type the collaborators deliver through queued
/// connections.
pub fn register(builder: ApplicationBuilder) -> ApplicationBuilder {
    builder
        .register_payload::<MarkerInfo>()
        .register_payload::<Vec<MarkerInfo>>()
        .register_payload::<TableModelRef>()
        .register_payload::<ProcessState>()
        .register_payload::<ExitStatus>()
        .register_payload::<ProcessError>()
}
