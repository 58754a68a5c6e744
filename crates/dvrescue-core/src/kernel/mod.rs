//! # dvrescue Core Kernel
//!
//! Drives the startup of the dvrescue GUI.
//!
//! ## Key Responsibilities & Components:
//!
//! - **Application Bootstrapping**: [`ApplicationBuilder`](bootstrap::ApplicationBuilder)
//!   fixes process attributes and cross-thread payload types, then builds the
//!   [`Application`](bootstrap::Application), which owns the event loop and
//!   walks the remaining startup steps up to [`Application::exec`](bootstrap::Application::exec).
//! - **Core Constants**: identity, main UI location, theme and exit codes in
//!   the `constants` submodule.
//! - **Error Handling**: the aggregate [`Error`](error::Error) and a `Result`
//!   alias in the `error` submodule.
pub mod bootstrap;
pub mod constants;
pub mod error;

pub use bootstrap::{Application, ApplicationAttribute, ApplicationBuilder, LaunchOptions};
pub use error::{Error, KernelLifecyclePhase, Result};
