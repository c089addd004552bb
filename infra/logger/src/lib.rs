//! # Logger
//!
//! Installs the process-wide `tracing` subscriber used by every Rally binary: a compact
//! console layer on stderr plus an optional rolling log file (plain or JSON), filtered by a
//! default level, an optional directive string and `RUST_LOG`.
//!
//! Most callers go through [`Logger::from_config`], which reads the `[logging]` section of
//! the workspace configuration. The builder is available for finer control.
//!
//! ## Example
//!
//! ```rust
//! # use rally_logger::{Logger, LevelFilter};
//! let _logger = Logger::builder()
//!     .name("rally")
//!     .console(true)
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use rally_domain::config::LoggingConfig;
use std::fs;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::str::FromStr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

#[derive(Debug)]
struct Settings {
    console: bool,
    directory: Option<PathBuf>,
    level: LevelFilter,
    rotation: Rotation,
    max_files: usize,
    json: bool,
    directives: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            console: true,
            directory: None,
            level: LevelFilter::INFO,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
            directives: None,
        }
    }
}

#[derive(Debug)]
pub struct NoName;
#[derive(Debug)]
pub struct WithName(String);

mod private {
    pub trait Sealed {}
}
impl private::Sealed for NoName {}
impl private::Sealed for WithName {}

/// A builder for configuring and initializing the global tracing subscriber.
///
/// A name is required before [`LoggerBuilder::init`] becomes available; it prefixes the
/// rolling log files (e.g., `rally.2026-10-16.log`).
#[derive(Debug)]
pub struct LoggerBuilder<N: private::Sealed = NoName> {
    settings: Settings,
    name: N,
}

impl LoggerBuilder<NoName> {
    /// Sets the name of the logger.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<WithName> {
        LoggerBuilder { settings: self.settings, name: WithName(name.into()) }
    }
}

impl<N: private::Sealed> LoggerBuilder<N> {
    /// Configures the minimum log level to be emitted.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.settings.level = level;
        self
    }

    /// Adds explicit filter directives (e.g., `rally_roster=debug,rally_registry=info`).
    ///
    /// `RUST_LOG` is ignored when directives are set; invalid directives make
    /// [`LoggerBuilder::init`] fail.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn env_filter(mut self, directives: impl Into<String>) -> Self {
        self.settings.directives = Some(directives.into());
        self
    }

    /// Enables or disables console output.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.settings.console = enabled;
        self
    }

    /// Writes logs to rolling files inside `directory`.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn path(mut self, directory: impl Into<PathBuf>) -> Self {
        self.settings.directory = Some(directory.into());
        self
    }

    /// Maximum number of rotated files to keep. Only meaningful with [`LoggerBuilder::path`].
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.settings.max_files = max;
        self
    }

    /// Rotation strategy for log files. Only meaningful with [`LoggerBuilder::path`].
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.settings.rotation = rotation;
        self
    }

    /// Emits file logs as JSON lines. Only meaningful with [`LoggerBuilder::path`].
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn json(mut self, enabled: bool) -> Self {
        self.settings.json = enabled;
        self
    }
}

impl LoggerBuilder<WithName> {
    /// Consumes the builder and installs the global tracing subscriber.
    ///
    /// # Returns
    /// A [`Logger`] handle. When file output is enabled it owns the [`WorkerGuard`] of the
    /// non-blocking writer and must be kept alive for the duration of the program.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for an empty name, zero `max_files`, invalid
    ///   directives or when no output is enabled.
    /// * [`LoggerError::Io`] if the log directory cannot be created.
    /// * [`LoggerError::Appender`] if the rolling appender cannot be built.
    /// * [`LoggerError::Subscriber`] if a global subscriber has already been set.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let Self { settings, name: WithName(name) } = self;
        validate(&settings, &name)?;

        let filter = env_filter(&settings)?;
        let mut layers = Vec::new();

        if settings.console {
            let console = layer()
                .compact()
                .with_target(false)
                .with_ansi(io::stderr().is_terminal())
                .with_writer(io::stderr);
            layers.push(console.boxed());
        }

        let guard = if let Some(directory) = &settings.directory {
            fs::create_dir_all(directory)
                .context(format!("Failed to create log directory: {}", directory.display()))?;

            let appender = RollingFileAppender::builder()
                .rotation(settings.rotation.clone())
                .filename_prefix(&name)
                .filename_suffix(LOG_FILE_SUFFIX)
                .max_log_files(settings.max_files)
                .build(directory)?;

            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = layer().with_writer(writer).with_ansi(false);
            layers.push(if settings.json { file_layer.json().boxed() } else { file_layer.boxed() });
            Some(guard)
        } else {
            None
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "No logging output enabled. Enable console or file output.".into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;
        tracing::debug!(logger = %name, "Logging initialized");

        Ok(Logger { guard })
    }
}

/// A handle to the initialized logging system.
///
/// Holds the background writer guard; drop it only when the application shuts down.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Returns a new [`LoggerBuilder`].
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { settings: Settings::default(), name: NoName }
    }

    /// Builds a logger from the `[logging]` configuration section.
    ///
    /// Console output is always on; `verbose` raises the level to `DEBUG` regardless of the
    /// configured one.
    ///
    /// # Errors
    /// Returns [`LoggerError::InvalidConfiguration`] if `level` is not a valid level name,
    /// plus every error of [`LoggerBuilder::init`].
    pub fn from_config(
        name: impl Into<String>,
        config: &LoggingConfig,
        verbose: bool,
    ) -> Result<Self, LoggerError> {
        let level = if verbose { LevelFilter::DEBUG } else { parse_level(&config.level)? };

        let mut builder = Self::builder().name(name).level(level).json(config.json);
        if let Some(directives) = &config.filter {
            builder = builder.env_filter(directives.clone());
        }
        if let Some(directory) = &config.directory {
            builder = builder.path(directory.clone());
        }

        builder.init()
    }

    /// Returns the file writer guard, if file output is enabled.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::debug!("Logging system shutting down, flushing buffers...");
        }
    }
}

fn parse_level(level: &str) -> Result<LevelFilter, LoggerError> {
    LevelFilter::from_str(level.trim()).map_err(|e| LoggerError::InvalidConfiguration {
        message: format!("Unknown log level '{level}': {e}").into(),
        context: None,
    })
}

fn validate(settings: &Settings, name: &str) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "Logger name cannot be empty".into(),
            context: None,
        });
    }

    if settings.max_files == 0 {
        return Err(LoggerError::InvalidConfiguration {
            message: "max_files must be greater than zero".into(),
            context: None,
        });
    }

    Ok(())
}

fn env_filter(settings: &Settings) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(settings.level.into());
    settings.directives.as_ref().map_or_else(
        || Ok(builder.from_env_lossy()),
        |directives| {
            builder.parse(directives).map_err(|e| LoggerError::InvalidConfiguration {
                message: format!("Invalid filter '{directives}': {e}").into(),
                context: None,
            })
        },
    )
}
