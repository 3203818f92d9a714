//! Logging setup for the binaries.
//!
//! Logs go to a file so they never interleave with the maze drawn in the terminal.

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;

pub const LOG_FILE_NAME: &str = "voromaze.log";

/// `DEBUG=1` raises the level from `info` to `debug`.
pub fn log_level() -> Level {
    match std::env::var("DEBUG") {
        Ok(val) if val == "1" => Level::DEBUG,
        _ => Level::INFO,
    }
}

/// Installs the global subscriber writing to [`LOG_FILE_NAME`] in the current directory.
///
/// The returned guard flushes pending records when dropped and must be held until exit.
pub fn init_logging() -> WorkerGuard {
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(log_level())
        .init();
    guard
}
