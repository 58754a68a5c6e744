use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::event::event_loop::LoopHandle;

/// Identifier returned by `connect_*`, used to disconnect
pub type ConnectionId = u64;

/// Callback attached to a [`Signal`]
pub type Slot<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// How a slot is invoked when its signal is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionType {
    /// Called inline by the emitting thread
    Direct,
    /// Posted to a loop and called there, after already queued work
    Queued,
}

enum Connection<T> {
    Direct(Slot<T>),
    Queued { handle: LoopHandle, slot: Slot<T> },
}

impl<T> Clone for Connection<T> {
    fn clone(&self) -> Self {
        match self {
            Connection::Direct(slot) => Connection::Direct(slot.clone()),
            Connection::Queued { handle, slot } => Connection::Queued {
                handle: handle.clone(),
                slot: slot.clone(),
            },
        }
    }
}

impl<T> Connection<T> {
    fn kind(&self) -> ConnectionType {
        match self {
            Connection::Direct(_) => ConnectionType::Direct,
            Connection::Queued { .. } => ConnectionType::Queued,
        }
    }
}

/// A typed notification with any number of connected slots.
pub struct Signal<T> {
    name: &'static str,
    connections: Mutex<Vec<(ConnectionId, Connection<T>)>>,
    next_id: AtomicU64,
}

impl<T: Clone + Send + 'static> Signal<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            connections: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Connects a slot that runs on the emitting thread.
    pub fn connect_direct<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.push(Connection::Direct(Arc::new(slot)))
    }

    /// Connects a slot that runs on the loop behind `handle`.
    ///
    /// The signal's argument type must be registered with the loop's payload
    /// registry, otherwise emissions are dropped with an error log.
    pub fn connect_queued<F>(&self, handle: &LoopHandle, slot: F) -> ConnectionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        if let Err(e) = handle.payloads().ensure_registered::<T>() {
            log::warn!("Queued connection to '{}' will not deliver: {}", self.name, e);
        }
        self.push(Connection::Queued {
            handle: handle.clone(),
            slot: Arc::new(slot),
        })
    }

    /// Removes a connection. Returns `false` if `id` was unknown.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        let mut connections = self.lock();
        let len_before = connections.len();
        connections.retain(|(c_id, _)| *c_id != id);
        connections.len() < len_before
    }

    /// Notifies every connected slot, in connection order.
    pub fn emit(&self, args: T) {
        // Snapshot so slots may connect or disconnect while being called.
        let connections: Vec<Connection<T>> =
            self.lock().iter().map(|(_, c)| c.clone()).collect();

        for connection in connections {
            match connection {
                Connection::Direct(slot) => slot(&args),
                Connection::Queued { handle, slot } => {
                    let delivered = handle.post_payload(args.clone(), move |args: T| slot(&args));
                    if let Err(e) = delivered {
                        log::error!("Cannot queue emission of '{}': {}", self.name, e);
                    }
                }
            }
        }
    }

    pub fn connection_count(&self) -> usize {
        self.lock().len()
    }

    /// Connection types in connection order.
    pub fn connection_types(&self) -> Vec<ConnectionType> {
        self.lock().iter().map(|(_, c)| c.kind()).collect()
    }

    fn push(&self, connection: Connection<T>) -> ConnectionId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.lock().push((id, connection));
        id
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(ConnectionId, Connection<T>)>> {
        // A panicking slot never holds this lock, so poisoning carries no torn state.
        self.connections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.connections.lock().map(|c| c.len()).unwrap_or(0);
        f.debug_struct("Signal")
            .field("name", &self.name)
            .field("connections", &count)
            .finish()
    }
}
