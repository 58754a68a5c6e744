use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

use crate::kernel::error::Result;
use crate::logging::error::LoggingError;
use crate::storage::local::LocalStorageProvider;
use crate::storage::provider::StorageProvider;

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_DIRECTIVES: &str = "info,dvrescue=debug,dvrescue_core=debug";

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoggingMode {
    #[default]
    Console,
    ConsoleAndFile,
}

struct FileSink {
    path: PathBuf,
    writer: Box<dyn Write + Send>,
}

#[derive(Default)]
struct FacilityState {
    file: Option<FileSink>,
}

/// Handle to the process-wide logging facility.
///
/// Clones share the same state, so enabling file mode through one handle is
/// seen by the installed subscriber.
#[derive(Clone, Default)]
pub struct LoggingFacility {
    state: Arc<Mutex<FacilityState>>,
}

impl LoggingFacility {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the global subscriber writing through this facility.
    ///
    /// `RUST_LOG` overrides `default_directives`. Fails if another global
    /// subscriber or `log` logger is already set.
    pub fn install(&self, default_directives: &str) -> std::result::Result<(), LoggingError> {
        let filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::try_new(default_directives).map_err(|e| LoggingError::InvalidFilter {
                directives: default_directives.to_string(),
                message: e.to_string(),
            })?,
        };

        let subscriber = tracing_subscriber::registry().with(filter).with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(self.clone()),
        );

        tracing_log::LogTracer::init().map_err(|e| LoggingError::AlreadyInstalled(e.to_string()))?;
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| LoggingError::AlreadyInstalled(e.to_string()))?;
        Ok(())
    }

    /// Additionally writes every log line to `path`, appending.
    ///
    /// One-way: there is no switch back to console only. Calling it again
    /// keeps the first file.
    pub fn enable_file(&self, path: &Path) -> Result<()> {
        // Never log while holding the lock: the installed writer takes it too.
        let mut state = self.lock()?;
        if let Some(sink) = &state.file {
            let current = sink.path.clone();
            drop(state);
            log::debug!("File logging already enabled at {}", current.display());
            return Ok(());
        }

        let (dir, file_name) = match (path.parent(), path.file_name()) {
            (Some(dir), Some(name)) => (dir.to_path_buf(), PathBuf::from(name)),
            _ => (PathBuf::new(), path.to_path_buf()),
        };
        let writer = LocalStorageProvider::new(dir).open_append(&file_name)?;
        state.file = Some(FileSink {
            path: path.to_path_buf(),
            writer,
        });
        drop(state);

        log::info!("Logging to file {}", path.display());
        Ok(())
    }

    pub fn mode(&self) -> LoggingMode {
        if self.is_file_enabled() {
            LoggingMode::ConsoleAndFile
        } else {
            LoggingMode::Console
        }
    }

    pub fn is_file_enabled(&self) -> bool {
        self.lock().map(|state| state.file.is_some()).unwrap_or(false)
    }

    /// Path of the log file, once file mode is enabled.
    pub fn file_path(&self) -> Option<PathBuf> {
        self.lock()
            .ok()
            .and_then(|state| state.file.as_ref().map(|sink| sink.path.clone()))
    }

    /// A writer to the current sinks.
    pub fn writer(&self) -> TeeWriter {
        TeeWriter {
            state: self.state.clone(),
        }
    }

    fn lock(&self) -> std::result::Result<MutexGuard<'_, FacilityState>, LoggingError> {
        self.state.lock().map_err(|_| LoggingError::Poisoned)
    }
}

impl fmt::Debug for LoggingFacility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingFacility")
            .field("mode", &self.mode())
            .field("file", &self.file_path())
            .finish()
    }
}

impl<'a> MakeWriter<'a> for LoggingFacility {
    type Writer = TeeWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.writer()
    }
}

/// Writes to stderr and, in file mode, to the log file.
pub struct TeeWriter {
    state: Arc<Mutex<FacilityState>>,
}

impl TeeWriter {
    fn with_file<F>(&self, op: F) -> io::Result<()>
    where
        F: FnOnce(&mut dyn Write) -> io::Result<()>,
    {
        let mut state = self
            .state
            .lock()
            .map_err(|_| io::Error::other("log state lock poisoned"))?;
        match state.file.as_mut() {
            Some(sink) => op(sink.writer.as_mut()),
            None => Ok(()),
        }
    }
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // A failing console must not stop the file copy.
        let _ = io::stderr().write_all(buf);
        self.with_file(|file| file.write_all(buf))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.with_file(|file| file.flush())
    }
}
