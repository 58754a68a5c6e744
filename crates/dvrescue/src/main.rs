mod cli;

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use dvrescue_core::kernel::constants::{
    EXIT_BOOTSTRAP_FAILURE, MAIN_UI_OVERRIDE_VAR, MAIN_UI_URL, PATH_VAR, UI_STYLE,
};
use dvrescue_core::kernel::{Error, Result};
use dvrescue_core::registry::CapabilityRegistry;
use dvrescue_core::{Application, ApplicationAttribute, SettingsIdentity, StandardPaths};
use log::{debug, error, info};
use url::Url;

use dvrescue::collaborators::DataModelContext;
use dvrescue::{capabilities, payloads, resources};

use crate::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Bad flags end the process here, before anything is touched.
    let cli = Cli::parse();

    let code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("dvrescue: {}", e);
            error!("Startup failed: {}", e);
            EXIT_BOOTSTRAP_FAILURE
        }
    };
    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<i32> {
    let builder = Application::builder().attribute(ApplicationAttribute::EnableHighDpiScaling);

    let data_model = Arc::new(DataModelContext::new());
    let mut registry = CapabilityRegistry::new();
    capabilities::register_types(&mut registry, &data_model)?;

    let builder = payloads::register(builder);
    let mut app = builder.build();
    // Registration ran before the subscriber existed.
    debug!(
        "Registered {} capabilities in {}",
        registry.len(),
        registry.modules().join(", ")
    );

    app.augment_path(&executable_dir()?);

    let paths = StandardPaths::from_env(app.platform())?;
    app.set_identity(SettingsIdentity::dvrescue(), paths)?;

    app.apply_launch_options(cli.launch_options())?;
    debug!(
        "PATH: {}",
        env::var_os(PATH_VAR).unwrap_or_default().to_string_lossy()
    );

    app.set_style(UI_STYLE);

    capabilities::register_singletons(&mut registry, app.settings()?)?;

    let engine = app.create_engine(registry, resources::bundle())?;
    data_model.set_engine(engine.handle());
    app.load_main_ui(main_ui_url()?)?;

    let handle = app.loop_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, quitting");
            handle.quit();
        }
    });

    Ok(app.exec().await)
}

fn executable_dir() -> Result<PathBuf> {
    let exe = env::current_exe().map_err(|e| Error::io(e, "current_exe", PathBuf::new()))?;
    exe.parent()
        .map(|dir| dir.to_path_buf())
        .ok_or_else(|| Error::Other(format!("executable {} has no directory", exe.display())))
}

/// The embedded main UI, unless overridden by a file on disk.
fn main_ui_url() -> Result<Url> {
    match env::var_os(MAIN_UI_OVERRIDE_VAR) {
        Some(path) => {
            let path = PathBuf::from(path);
            let absolute = if path.is_absolute() {
                path
            } else {
                env::current_dir()
                    .map_err(|e| Error::io(e, "current_dir", PathBuf::new()))?
                    .join(path)
            };
            info!("Main UI overridden by {}", absolute.display());
            Url::from_file_path(&absolute)
                .map_err(|_| Error::Other(format!("not a file path: {}", absolute.display())))
        }
        None => Url::parse(MAIN_UI_URL).map_err(|e| Error::Other(format!("{}: {}", MAIN_UI_URL, e))),
    }
}
