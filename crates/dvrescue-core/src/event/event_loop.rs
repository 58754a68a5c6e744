use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::event::error::EventSystemError;
use crate::event::payload::PayloadRegistry;

/// A unit of work executed on the loop's thread
pub type Task = Box<dyn FnOnce() + Send + 'static>;

enum LoopMessage {
    Invoke { label: &'static str, task: Task },
    Exit(i32),
}

/// Single-threaded main loop.
///
/// Work posted through any [`LoopHandle`] runs on the thread driving
/// [`EventLoop::exec`], one task at a time and in submission order. The loop
/// runs until some task calls [`LoopHandle::exit`].
pub struct EventLoop {
    receiver: UnboundedReceiver<LoopMessage>,
    handle: LoopHandle,
}

/// Cloneable, thread-safe handle for posting work onto an [`EventLoop`].
#[derive(Clone)]
pub struct LoopHandle {
    sender: UnboundedSender<LoopMessage>,
    payloads: Arc<PayloadRegistry>,
}

impl EventLoop {
    /// Creates a loop that accepts the payload types of `payloads`.
    pub fn new(payloads: PayloadRegistry) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            receiver,
            handle: LoopHandle {
                sender,
                payloads: Arc::new(payloads),
            },
        }
    }

    pub fn handle(&self) -> LoopHandle {
        self.handle.clone()
    }

    /// Runs queued tasks until an exit is requested and returns its code.
    pub async fn exec(mut self) -> i32 {
        log::debug!("Entering event loop");
        // The loop keeps its own sender alive, so recv() only yields None
        // if that invariant is broken.
        while let Some(message) = self.receiver.recv().await {
            if let Some(code) = Self::dispatch(message) {
                log::debug!("Event loop exited with code {}", code);
                return code;
            }
        }
        log::warn!("Event loop channel closed without an exit request");
        0
    }

    /// Runs every task already queued without waiting for new ones.
    ///
    /// Returns the exit code if one of them requested an exit.
    pub fn process_pending(&mut self) -> Option<i32> {
        while let Ok(message) = self.receiver.try_recv() {
            if let Some(code) = Self::dispatch(message) {
                return Some(code);
            }
        }
        None
    }

    fn dispatch(message: LoopMessage) -> Option<i32> {
        match message {
            LoopMessage::Invoke { label, task } => {
                log::trace!("Running queued task '{}'", label);
                task();
                None
            }
            LoopMessage::Exit(code) => Some(code),
        }
    }
}

impl fmt::Debug for EventLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventLoop")
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}

impl LoopHandle {
    /// Queues `task` to run on the loop thread.
    pub fn post<F>(&self, task: F) -> Result<(), EventSystemError>
    where
        F: FnOnce() + Send + 'static,
    {
        self.post_labeled("task", task)
    }

    /// Queues `task` with a label used in trace output and errors.
    pub fn post_labeled<F>(&self, label: &'static str, task: F) -> Result<(), EventSystemError>
    where
        F: FnOnce() + Send + 'static,
    {
        self.sender
            .send(LoopMessage::Invoke {
                label,
                task: Box::new(task),
            })
            .map_err(|_| EventSystemError::LoopClosed {
                task: label.to_string(),
            })
    }

    /// Delivers `payload` to `receiver` on the loop thread.
    ///
    /// Fails if `T` was not registered with the loop's [`PayloadRegistry`].
    pub fn post_payload<T, F>(&self, payload: T, receiver: F) -> Result<(), EventSystemError>
    where
        T: Send + 'static,
        F: FnOnce(T) + Send + 'static,
    {
        self.payloads.ensure_registered::<T>()?;
        self.post_labeled(std::any::type_name::<T>(), move || receiver(payload))
    }

    /// Asks the loop to stop with `code`. Tasks queued after this one are not run.
    pub fn exit(&self, code: i32) {
        log::debug!("Exit requested with code {}", code);
        if self.sender.send(LoopMessage::Exit(code)).is_err() {
            log::warn!("Exit({}) requested after the event loop stopped", code);
        }
    }

    /// Shorthand for `exit(0)`.
    pub fn quit(&self) {
        self.exit(0);
    }

    pub fn payloads(&self) -> &PayloadRegistry {
        &self.payloads
    }

    /// Whether the owning [`EventLoop`] still exists.
    pub fn is_open(&self) -> bool {
        !self.sender.is_closed()
    }
}

impl fmt::Debug for LoopHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoopHandle")
            .field("open", &self.is_open())
            .field("payload_types", &self.payloads.len())
            .finish()
    }
}
