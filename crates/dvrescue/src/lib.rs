//! # dvrescue
//!
//! The native side of the dvrescue GUI: capabilities registered for the main
//! UI description, the payload types they send across threads and the
//! embedded UI resources.
pub mod capabilities;
pub mod collaborators;
pub mod payloads;
pub mod resources;
