use clap::Parser;
use dvrescue_core::LaunchOptions;

/// dvrescue: GUI
#[derive(Parser, Debug)]
#[command(name = "dvrescue", version, about = "dvrescue: GUI", long_about = None)]
pub struct Cli {
    /// reset application settings
    #[arg(short = 'r', long = "resetsettings")]
    pub reset_settings: bool,

    /// enable file logging
    #[arg(short = 'l', long = "log")]
    pub log: bool,
}

impl Cli {
    pub fn launch_options(&self) -> LaunchOptions {
        LaunchOptions {
            reset_settings: self.reset_settings,
            log_to_file: self.log,
        }
    }
}
