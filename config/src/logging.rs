//! Console and per-run file logging for binaries (`tracing-init` feature).
//!
//! The console layer writes to stderr at `RUST_LOG` (default `info`, or `debug` when verbose).
//! The optional file layer always records `debug` and is truncated on every start, so the file
//! only ever holds the latest run.

use std::fs::File;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::LoadError;

/// How [`init_tracing`] sets up the subscriber.
#[derive(Debug, Clone, Default)]
pub struct LoggingOptions {
    /// Raise the console default from `info` to `debug`. `RUST_LOG` still wins when set.
    pub verbose: bool,
    /// Debug log file, truncated per run. `None` disables file logging.
    pub log_file: Option<PathBuf>,
}

impl LoggingOptions {
    fn console_filter(&self) -> EnvFilter {
        let default = if self.verbose { "debug" } else { "info" };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    }
}

/// Installs the global subscriber. Keep the returned guard alive until exit so buffered file
/// lines are flushed.
pub fn init_tracing(options: &LoggingOptions) -> Result<Option<WorkerGuard>, LoadError> {
    let console = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(options.console_filter());

    let (file_layer, guard) = match &options.log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(LoadError::LogFile)?;
            }
            let file = File::create(path).map_err(LoadError::LogFile)?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(LevelFilter::DEBUG);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file_layer)
        .try_init()
        .map_err(|e| LoadError::Tracing(e.to_string()))?;

    tracing::debug!(log_file = ?options.log_file, verbose = options.verbose, "tracing initialized");
    Ok(guard)
}
