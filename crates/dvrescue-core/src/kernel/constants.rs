/// Application name
pub const APP_NAME: &str = "dvrescue";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Organization name, first component of the settings namespace
pub const ORGANIZATION_NAME: &str = "dvrescue";

/// Organization domain, used for reverse-domain settings names on macOS
pub const ORGANIZATION_DOMAIN: &str = "dvrescue.com";

/// Application name as used by the settings store
pub const APPLICATION_NAME: &str = "dvrescue";

/// Human readable description shown by `--help`
pub const APP_DESCRIPTION: &str = "dvrescue: GUI";

/// Resource identifier of the main UI description
pub const MAIN_UI_URL: &str = "qrc:/main.ui.json";

/// Visual theme selected before the UI is loaded
pub const UI_STYLE: &str = "Material";

/// Log file name inside the application data directory
pub const LOG_FILE_NAME: &str = "dvrescue.log";

/// Environment variable holding the executable search path
pub const PATH_VAR: &str = "PATH";

/// Environment variable overriding the main UI description with a file on disk
pub const MAIN_UI_OVERRIDE_VAR: &str = "DVRESCUE_MAIN_UI";

/// Exit code of a normal UI quit
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code when bootstrap fails before the loop is entered
pub const EXIT_BOOTSTRAP_FAILURE: i32 = 1;

/// Exit code when the root object of the main UI description fails to construct
pub const EXIT_UI_LOAD_FAILURE: i32 = -1;
