//! # dvrescue Core Logging
//!
//! The process-wide logging facility. Library code logs through the `log`
//! facade; [`LoggingFacility::install`] routes those records into a
//! `tracing-subscriber` stack whose writer tees every line to stderr and, once
//! file mode is enabled, to the application log file.
pub mod error;
pub mod facility;

pub use error::LoggingError;
pub use facility::{LoggingFacility, LoggingMode, TeeWriter, DEFAULT_DIRECTIVES};
