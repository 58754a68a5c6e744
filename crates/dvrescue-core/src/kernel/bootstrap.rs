use std::ffi::OsString;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, PoisonError};

use url::Url;

use crate::environment::{apply_path_augmentation, Platform};
use crate::event::{EventLoop, LoopHandle, PayloadRegistry};
use crate::kernel::constants;
use crate::kernel::error::{Error, KernelLifecyclePhase, Result};
use crate::logging::{LoggingFacility, LoggingMode, DEFAULT_DIRECTIVES};
use crate::registry::CapabilityRegistry;
use crate::storage::{SettingsIdentity, SettingsStore, SharedSettings, StandardPaths};
use crate::ui_bridge::{ObjectCreated, ResourceBundle, UiEngine};

/// Process-wide switches that must be chosen before the application exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApplicationAttribute {
    EnableHighDpiScaling,
}

/// Command-line driven side effects applied once the settings store is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaunchOptions {
    /// Remove every key from the settings store
    pub reset_settings: bool,
    /// Also write log output to the application log file
    pub log_to_file: bool,
}

/// Collects what has to be fixed before the [`Application`] is constructed:
/// process attributes and the payload types allowed across threads.
#[derive(Debug)]
pub struct ApplicationBuilder {
    attributes: Vec<ApplicationAttribute>,
    payloads: PayloadRegistry,
    platform: Platform,
    install_subscriber: bool,
}

impl Default for ApplicationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationBuilder {
    pub fn new() -> Self {
        Self {
            attributes: Vec::new(),
            payloads: PayloadRegistry::new(),
            platform: Platform::current(),
            install_subscriber: true,
        }
    }

    pub fn attribute(mut self, attribute: ApplicationAttribute) -> Self {
        if !self.attributes.contains(&attribute) {
            self.attributes.push(attribute);
        }
        self
    }

    /// Allows `T` to be delivered through queued connections.
    pub fn register_payload<T: Send + 'static>(mut self) -> Self {
        self.payloads.register::<T>();
        self
    }

    /// Overrides the platform used for PATH and settings locations.
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Leaves the global subscriber alone, for hosts that install their own.
    pub fn without_subscriber(mut self) -> Self {
        self.install_subscriber = false;
        self
    }

    /// Constructs the logging facility, then the application and its loop.
    ///
    /// Nothing is logged before this point, so the builder's choices are
    /// reported here once the subscriber is in place.
    pub fn build(self) -> Application {
        let logging = LoggingFacility::new();
        if self.install_subscriber {
            if let Err(e) = logging.install(DEFAULT_DIRECTIVES) {
                eprintln!("{}: logging not installed: {}", constants::APP_NAME, e);
            }
        }

        log::info!("Starting {} v{}", constants::APP_NAME, constants::APP_VERSION);
        log::debug!("Application attributes: {:?}", self.attributes);
        log::debug!(
            "Payload types: {}",
            self.payloads.type_names().join(", ")
        );

        Application {
            attributes: self.attributes,
            platform: self.platform,
            event_loop: EventLoop::new(self.payloads),
            logging,
            identity: None,
            paths: None,
            settings: None,
            style: None,
            engine: None,
        }
    }
}

/// The running dvrescue application.
///
/// Owns the main event loop, the logging facility and, once an identity is
/// set, the settings store. Methods are meant to be called in the bootstrap
/// order; steps that need an earlier one fail with
/// [`Error::KernelLifecycleError`] otherwise.
pub struct Application {
    attributes: Vec<ApplicationAttribute>,
    platform: Platform,
    event_loop: EventLoop,
    logging: LoggingFacility,
    identity: Option<SettingsIdentity>,
    paths: Option<StandardPaths>,
    settings: Option<SharedSettings>,
    style: Option<String>,
    engine: Option<Arc<UiEngine>>,
}

impl Application {
    pub fn builder() -> ApplicationBuilder {
        ApplicationBuilder::new()
    }

    pub fn has_attribute(&self, attribute: ApplicationAttribute) -> bool {
        self.attributes.contains(&attribute)
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn loop_handle(&self) -> LoopHandle {
        self.event_loop.handle()
    }

    pub fn logging(&self) -> &LoggingFacility {
        &self.logging
    }

    pub fn logging_mode(&self) -> LoggingMode {
        self.logging.mode()
    }

    /// Makes the tools shipped next to the executable reachable through `PATH`.
    pub fn augment_path(&self, exe_dir: &Path) -> OsString {
        apply_path_augmentation(self.platform, exe_dir)
    }

    /// Names the settings namespace and opens its store under `paths`.
    pub fn set_identity(&mut self, identity: SettingsIdentity, paths: StandardPaths) -> Result<()> {
        let file = paths.settings_file(&identity, self.platform);
        let store = SettingsStore::open(identity.clone(), &file).map_err(|e| Error::KernelLifecycleError {
            phase: KernelLifecyclePhase::Settings,
            message: format!("cannot open settings {}", file.display()),
            source: Some(Box::new(e)),
        })?;
        log::info!("Settings of {} at {}", identity, file.display());

        self.settings = Some(store.into_shared());
        self.identity = Some(identity);
        self.paths = Some(paths);
        Ok(())
    }

    pub fn identity(&self) -> Option<&SettingsIdentity> {
        self.identity.as_ref()
    }

    /// The settings store opened by [`Application::set_identity`].
    pub fn settings(&self) -> Result<SharedSettings> {
        self.settings.clone().ok_or_else(|| {
            Error::lifecycle(KernelLifecyclePhase::Settings, "settings identity is not set")
        })
    }

    /// Applies the command-line flags: settings reset, then file logging.
    pub fn apply_launch_options(&mut self, options: LaunchOptions) -> Result<()> {
        log::info!(
            "Flags: resetsettings={} log={}",
            options.reset_settings,
            options.log_to_file
        );

        if options.reset_settings {
            let settings = self.settings()?;
            let mut store = settings.lock().unwrap_or_else(PoisonError::into_inner);
            let removed = store.clear();
            store.sync()?;
            log::info!("Settings reset, {} keys removed", removed);
        }

        if options.log_to_file {
            let (identity, paths) = match (&self.identity, &self.paths) {
                (Some(identity), Some(paths)) => (identity, paths),
                _ => {
                    return Err(Error::lifecycle(
                        KernelLifecyclePhase::Settings,
                        "file logging needs the application identity",
                    ));
                }
            };
            self.logging.enable_file(&paths.log_file(identity))?;
        }
        Ok(())
    }

    /// Selects the visual style of windows created by the UI engine.
    pub fn set_style(&mut self, style: &str) {
        self.style = Some(style.to_string());
    }

    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    /// Creates the UI engine over the now complete capability registry.
    pub fn create_engine(
        &mut self,
        registry: CapabilityRegistry,
        resources: ResourceBundle,
    ) -> Result<Arc<UiEngine>> {
        let engine = UiEngine::new(registry, resources, self.event_loop.handle())?;
        if let Some(style) = &self.style {
            engine.set_style(style);
        }
        self.engine = Some(engine.clone());
        Ok(engine)
    }

    pub fn engine(&self) -> Option<&Arc<UiEngine>> {
        self.engine.as_ref()
    }

    /// Schedules loading of the main UI and ends the loop with
    /// [`constants::EXIT_UI_LOAD_FAILURE`] if its root object cannot be built.
    pub fn load_main_ui(&self, url: Url) -> Result<()> {
        let engine = self.engine.as_ref().ok_or_else(|| {
            Error::lifecycle(KernelLifecyclePhase::UiLoad, "UI engine is not created")
        })?;

        let handle = self.event_loop.handle();
        let exit_handle = handle.clone();
        let requested = url.clone();
        engine
            .object_created()
            .connect_queued(&handle, move |event: &ObjectCreated| {
                // Only the requested document decides the exit code.
                if event.object.is_none() && event.url == requested {
                    log::error!("Root object of {} could not be created", requested);
                    exit_handle.exit(constants::EXIT_UI_LOAD_FAILURE);
                }
            });
        engine.load(url);
        Ok(())
    }

    /// Runs the event loop and returns its exit code.
    ///
    /// Pending settings changes are written once the loop has stopped.
    pub async fn exec(self) -> i32 {
        let Application {
            event_loop,
            settings,
            engine,
            ..
        } = self;

        let code = event_loop.exec().await;
        drop(engine);
        if let Some(settings) = settings {
            let mut store = settings.lock().unwrap_or_else(PoisonError::into_inner);
            if let Err(e) = store.sync() {
                log::error!("Failed to write settings: {}", e);
            }
        }
        log::info!("{} exiting with code {}", constants::APP_NAME, code);
        code
    }
}

impl fmt::Debug for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Application")
            .field("attributes", &self.attributes)
            .field("platform", &self.platform)
            .field("identity", &self.identity)
            .field("logging", &self.logging)
            .field("style", &self.style)
            .field("engine", &self.engine.is_some())
            .finish_non_exhaustive()
    }
}
