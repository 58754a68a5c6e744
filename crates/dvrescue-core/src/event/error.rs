//! # dvrescue Core Event System Errors
//!
//! Defines [`EventSystemError`], covering failures to post work onto the
//! main loop and cross-thread payloads whose type was never registered.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventSystemError {
    #[error("Event loop is no longer running; dropped task '{task}'")]
    LoopClosed { task: String },

    #[error("Payload type '{type_name}' was not registered for cross-thread delivery")]
    UnregisteredPayload { type_name: &'static str },

    #[error("Attempted to operate on a poisoned event component: {component}")]
    Poisoned { component: String },
}
