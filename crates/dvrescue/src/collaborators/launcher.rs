use std::any::Any;
use std::process::{Command, Stdio};
use std::sync::{Arc, Mutex, PoisonError};

use dvrescue_core::event::{LoopHandle, Signal};
use dvrescue_core::kernel::{Error, Result};
use dvrescue_core::ui_bridge::{UiBridgeError, UiObject};
use serde_json::Value;

use crate::payloads::{ExitStatus, ProcessError, ProcessState};

/// Shared between the launcher and its worker thread.
#[derive(Debug)]
struct LaunchState {
    state: Mutex<ProcessState>,
    output: Mutex<String>,
    state_changed: Signal<ProcessState>,
    finished: Signal<ExitStatus>,
    error_occurred: Signal<ProcessError>,
}

/// Starts an external command-line tool and reports its progress on the
/// main loop.
///
/// The program is looked up through `PATH`, which is why the bootstrap
/// augments it before any launcher exists.
#[derive(Debug)]
pub struct Launcher {
    loop_handle: LoopHandle,
    program: Mutex<Option<String>>,
    arguments: Mutex<Vec<String>>,
    shared: Arc<LaunchState>,
}

impl Launcher {
    pub fn new(loop_handle: LoopHandle) -> Self {
        Self {
            loop_handle,
            program: Mutex::new(None),
            arguments: Mutex::new(Vec::new()),
            shared: Arc::new(LaunchState {
                state: Mutex::new(ProcessState::NotRunning),
                output: Mutex::new(String::new()),
                state_changed: Signal::new("state_changed"),
                finished: Signal::new("finished"),
                error_occurred: Signal::new("error_occurred"),
            }),
        }
    }

    pub fn set_program(&self, program: &str) {
        *self.program.lock().unwrap_or_else(PoisonError::into_inner) = Some(program.to_string());
    }

    pub fn set_arguments(&self, arguments: Vec<String>) {
        *self.arguments.lock().unwrap_or_else(PoisonError::into_inner) = arguments;
    }

    pub fn state(&self) -> ProcessState {
        *self.shared.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Standard output of the last finished run.
    pub fn output(&self) -> String {
        self.shared.output.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn state_changed(&self) -> &Signal<ProcessState> {
        &self.shared.state_changed
    }

    pub fn finished(&self) -> &Signal<ExitStatus> {
        &self.shared.finished
    }

    pub fn error_occurred(&self) -> &Signal<ProcessError> {
        &self.shared.error_occurred
    }

    /// Starts the configured program on a worker thread.
    pub fn execute(&self) -> Result<()> {
        let program = self
            .program
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or_else(|| Error::from("Launcher has no program"))?;
        let arguments = self.arguments.lock().unwrap_or_else(PoisonError::into_inner).clone();
        if self.state() != ProcessState::NotRunning {
            return Err(Error::Other(format!("{} is already running", program)));
        }

        log::info!("Launching {} {:?}", program, arguments);
        set_state(&self.shared, ProcessState::Starting);

        let handle = self.loop_handle.clone();
        let shared = self.shared.clone();
        std::thread::Builder::new()
            .name("dvrescue-launcher".to_string())
            .spawn(move || run(&handle, &shared, &program, &arguments))
            .map_err(|e| Error::Other(format!("cannot spawn launcher thread: {}", e)))?;
        Ok(())
    }
}

fn run(handle: &LoopHandle, shared: &Arc<LaunchState>, program: &str, arguments: &[String]) {
    let child = Command::new(program)
        .args(arguments)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn();

    let child = match child {
        Ok(child) => child,
        Err(e) => {
            log::warn!("Cannot start {}: {}", program, e);
            fail(handle, shared, ProcessError::FailedToStart);
            return;
        }
    };
    deliver_state(handle, shared, ProcessState::Running);

    match child.wait_with_output() {
        Ok(output) => {
            *shared.output.lock().unwrap_or_else(PoisonError::into_inner) =
                String::from_utf8_lossy(&output.stdout).into_owned();
            // No exit code means the process was killed by a signal.
            let status = match output.status.code() {
                Some(_) => ExitStatus::NormalExit,
                None => ExitStatus::CrashExit,
            };
            if status == ExitStatus::CrashExit {
                deliver(handle, shared, ProcessError::Crashed, |s| &s.error_occurred);
            }
            deliver_state(handle, shared, ProcessState::NotRunning);
            deliver(handle, shared, status, |s| &s.finished);
        }
        Err(e) => {
            log::warn!("Lost {}: {}", program, e);
            fail(handle, shared, ProcessError::ReadError);
        }
    }
}

fn fail(handle: &LoopHandle, shared: &Arc<LaunchState>, error: ProcessError) {
    deliver(handle, shared, error, |s| &s.error_occurred);
    deliver_state(handle, shared, ProcessState::NotRunning);
}

fn set_state(shared: &LaunchState, state: ProcessState) {
    *shared.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    shared.state_changed.emit(state);
}

fn deliver_state(handle: &LoopHandle, shared: &Arc<LaunchState>, state: ProcessState) {
    let target = shared.clone();
    if let Err(e) = handle.post_payload(state, move |state| set_state(&target, state)) {
        log::error!("Cannot report launcher state: {}", e);
    }
}

fn deliver<T, F>(handle: &LoopHandle, shared: &Arc<LaunchState>, value: T, signal: F)
where
    T: Clone + Send + 'static,
    F: Fn(&LaunchState) -> &Signal<T> + Send + 'static,
{
    let target = shared.clone();
    if let Err(e) = handle.post_payload(value, move |value| signal(&target).emit(value)) {
        log::error!("Cannot report launcher result: {}", e);
    }
}

impl UiObject for Launcher {
    fn type_name(&self) -> &str {
        "Launcher"
    }

    fn property(&self, name: &str) -> Option<Value> {
        match name {
            "program" => self
                .program
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
                .map(Value::String),
            "arguments" => Some(Value::from(
                self.arguments.lock().unwrap_or_else(PoisonError::into_inner).clone(),
            )),
            "output" => Some(Value::String(self.output())),
            _ => None,
        }
    }

    fn set_property(&self, name: &str, value: Value) -> std::result::Result<(), UiBridgeError> {
        let invalid = |reason: &str| UiBridgeError::InvalidPropertyValue {
            type_name: "Launcher".to_string(),
            property: name.to_string(),
            reason: reason.to_string(),
        };
        match name {
            "program" => {
                let program = value.as_str().ok_or_else(|| invalid("expected a string"))?;
                self.set_program(program);
                Ok(())
            }
            "arguments" => {
                let arguments: Vec<String> =
                    serde_json::from_value(value).map_err(|e| invalid(&e.to_string()))?;
                self.set_arguments(arguments);
                Ok(())
            }
            _ => Err(UiBridgeError::UnknownProperty {
                type_name: self.type_name().to_string(),
                property: name.to_string(),
            }),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
