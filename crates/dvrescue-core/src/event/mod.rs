//! # dvrescue Core Event System
//!
//! The main loop and the plumbing that feeds it:
//!
//! - [`EventLoop`] / [`LoopHandle`]: a single-threaded task queue. Work posted
//!   from any thread is drained in submission order on the loop's thread.
//! - [`Signal`]: typed notifications with direct or queued slots.
//! - [`PayloadRegistry`]: the types allowed to travel through queued
//!   deliveries. It is filled before the loop exists and frozen with it.
pub mod error;
pub mod event_loop;
pub mod payload;
pub mod signal;

pub use error::EventSystemError;
pub use event_loop::{EventLoop, LoopHandle, Task};
pub use payload::PayloadRegistry;
pub use signal::{ConnectionId, ConnectionType, Signal, Slot};

// Test module declaration
#[cfg(test)]
mod tests;
