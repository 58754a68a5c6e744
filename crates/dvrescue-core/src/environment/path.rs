use std::env;
use std::ffi::OsString;
use std::path::Path;

use crate::environment::Platform;
use crate::kernel::constants::PATH_VAR;

/// Directories prepended on Windows, relative to the executable directory.
/// The executable directory itself follows them.
const WINDOWS_TOOL_DIRS: [&str; 3] = ["cygwin/bin", "scripts", "tools"];

/// Directory prepended on macOS, relative to the executable directory
const MACOS_HELPERS_DIR: &str = "../Helpers";

/// Converts `/` to the platform's directory separator.
pub fn to_native_separators(path: &str, platform: Platform) -> String {
    match platform {
        Platform::Windows => path.replace('/', "\\"),
        Platform::MacOs | Platform::Other => path.to_string(),
    }
}

/// Returns `current_path` with the platform's bundled tool directories in front.
///
/// `exe_dir` is the directory of the running executable, written with `/`
/// separators. Every prepended entry is followed by the list separator, so
/// the original value starts right after the last one.
pub fn compute_augmented_path(platform: Platform, exe_dir: &str, current_path: &str) -> String {
    let mut prefix = String::new();
    match platform {
        Platform::Windows => {
            for dir in WINDOWS_TOOL_DIRS {
                prefix.push_str(&to_native_separators(&format!("{}/{}", exe_dir, dir), platform));
                prefix.push(platform.path_list_separator());
            }
            prefix.push_str(&to_native_separators(exe_dir, platform));
            prefix.push(platform.path_list_separator());
        }
        Platform::MacOs => {
            prefix.push_str(&to_native_separators(
                &format!("{}/{}", exe_dir, MACOS_HELPERS_DIR),
                platform,
            ));
            prefix.push(platform.path_list_separator());
        }
        Platform::Other => return current_path.to_string(),
    }
    prefix + current_path
}

/// Rewrites the process `PATH` for `platform` and returns the new value.
///
/// The original value is appended byte for byte, so entries that are not
/// valid Unicode survive. Must run while the process is still
/// single-threaded, before any collaborator starts a child process.
pub fn apply_path_augmentation(platform: Platform, exe_dir: &Path) -> OsString {
    let current = env::var_os(PATH_VAR).unwrap_or_default();
    if platform == Platform::Other {
        return current;
    }

    let exe_dir = exe_dir.to_string_lossy().replace('\\', "/");
    log::debug!("appDirPath: {}", exe_dir);
    let mut augmented = OsString::from(compute_augmented_path(platform, &exe_dir, ""));
    augmented.push(&current);
    // SAFETY: called during startup before any other thread is spawned, so
    // nothing can read the environment concurrently.
    unsafe {
        env::set_var(PATH_VAR, &augmented);
    }
    augmented
}
