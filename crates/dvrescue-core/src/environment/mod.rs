//! # dvrescue Core Environment
//!
//! Platform detection and the executable search path.
//!
//! Collaborators shell out to command-line tools shipped next to the
//! application. [`compute_augmented_path`] decides how `PATH` must change so
//! those tools are found; [`apply_path_augmentation`] writes the result back
//! to the process environment.
pub mod path;

pub use path::{apply_path_augmentation, compute_augmented_path, to_native_separators};

use std::fmt;

/// Operating system family the bootstrap distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    /// Linux and every other Unix; no PATH changes
    Other,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Other
        }
    }

    /// Separator between `PATH` entries.
    pub fn path_list_separator(&self) -> char {
        match self {
            Platform::Windows => ';',
            Platform::MacOs | Platform::Other => ':',
        }
    }

    /// Separator between path components.
    pub fn dir_separator(&self) -> char {
        match self {
            Platform::Windows => '\\',
            Platform::MacOs | Platform::Other => '/',
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Windows => "windows",
            Platform::MacOs => "macos",
            Platform::Other => "unix",
        };
        f.write_str(name)
    }
}
