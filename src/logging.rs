//! File-based logging setup
//!
//! Standard output belongs to the command results, so all diagnostics go to
//! a log file in the data directory.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive
pub const LOG_ENV: &str = "MPK_VERSION_CHANGER_LOG";

const DEFAULT_FILTER: &str = "info";

/// Install a JSON subscriber writing to `log_path`.
///
/// The returned guard flushes pending records on drop and must be kept alive
/// for the lifetime of the program.
pub fn init(log_path: &Path) -> std::io::Result<WorkerGuard> {
    let dir = log_path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)?;

    let file_name = log_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "mpk-version-changer.log".to_string());

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)
        .map_err(std::io::Error::other)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init();

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn init_creates_missing_log_directory() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("nested").join("test.log");

        let guard = init(&log_path).unwrap();
        drop(guard);

        assert!(log_path.parent().unwrap().is_dir());
        assert!(log_path.is_file());
    }

    #[test]
    fn init_returns_error_when_log_file_cannot_be_created() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("taken");
        std::fs::create_dir_all(&log_path).unwrap();

        let result = init(&log_path);

        assert!(result.is_err());
    }
}
