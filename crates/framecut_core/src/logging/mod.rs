//! Logging setup.
//!
//! Library code only emits `tracing` events. Binaries call [`init_tracing`]
//! once at startup to send them to stderr and, optionally, to a daily
//! rolling log file.

mod types;

pub use types::LogLevel;

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// File name prefix of rolled log files.
pub const LOG_FILE_NAME: &str = "framecut.log";

/// Initialize the global tracing subscriber.
///
/// - Respects `RUST_LOG`, falling back to `default_level`
/// - Writes to stderr
/// - Also writes to `<logs_folder>/framecut.log.<date>` when a folder is given
///
/// The returned guard flushes the file writer on drop and must be held
/// until the program exits.
pub fn init_tracing(default_level: LogLevel, logs_folder: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_to_filter_str(default_level)));

    let (file_layer, guard) = match logs_folder {
        Some(folder) => {
            let appender = RollingFileAppender::new(Rotation::DAILY, folder, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false),
        )
        .with(file_layer)
        .init();

    guard
}

/// Initialize tracing for tests (only logs warnings and above).
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}

/// Convert LogLevel to filter string.
fn level_to_filter_str(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace => "trace",
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warn => "warn",
        LogLevel::Error => "error",
    }
}
