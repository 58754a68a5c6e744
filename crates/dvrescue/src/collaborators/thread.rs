use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use dvrescue_core::event::{LoopHandle, Signal};
use dvrescue_core::kernel::{Error, Result};
use dvrescue_core::ui_bridge::UiObject;
use serde_json::Value;

/// Runs one piece of work off the main loop and reports back on it.
#[derive(Debug)]
pub struct Thread {
    loop_handle: LoopHandle,
    running: Arc<AtomicBool>,
    finished: Arc<Signal<()>>,
}

impl Thread {
    pub fn new(loop_handle: LoopHandle) -> Self {
        Self {
            loop_handle,
            running: Arc::new(AtomicBool::new(false)),
            finished: Arc::new(Signal::new("finished")),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Emitted on the main loop once the work has returned.
    pub fn finished(&self) -> &Signal<()> {
        &self.finished
    }

    /// Runs `work` on a new thread. Only one run at a time.
    pub fn start<F>(&self, work: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(Error::from("Thread is already running"));
        }

        let handle = self.loop_handle.clone();
        let running = self.running.clone();
        let finished = self.finished.clone();
        let spawned = std::thread::Builder::new()
            .name("dvrescue-worker".to_string())
            .spawn(move || {
                let _done = RunGuard {
                    handle,
                    running,
                    finished,
                };
                work();
            });

        if let Err(e) = spawned {
            self.running.store(false, Ordering::SeqCst);
            return Err(Error::Other(format!("cannot spawn worker thread: {}", e)));
        }
        Ok(())
    }
}

/// Ends a run when the worker returns or unwinds.
struct RunGuard {
    handle: LoopHandle,
    running: Arc<AtomicBool>,
    finished: Arc<Signal<()>>,
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        if std::thread::panicking() {
            log::error!("Worker thread panicked");
        }
        self.running.store(false, Ordering::SeqCst);
        let finished = self.finished.clone();
        if let Err(e) = self.handle.post_labeled("thread_finished", move || finished.emit(())) {
            log::warn!("Worker finished after the main loop stopped: {}", e);
        }
    }
}

impl UiObject for Thread {
    fn type_name(&self) -> &str {
        "Thread"
    }

    fn property(&self, name: &str) -> Option<Value> {
        match name {
            "running" => Some(Value::Bool(self.is_running())),
            _ => None,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
